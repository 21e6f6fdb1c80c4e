//! Property tests for draft and send validation.

#![allow(clippy::unwrap_used)]

mod common;

use common::{ALICE, FakeBackend};
use mailroom_core::{DraftId, DraftManager, MailboxManager, MessageFields, is_blank};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof![blank(), "[a-zA-Z0-9@. ]{1,24}"]
}

fn filled() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9@.]{1,12}( [a-zA-Z0-9@.]{1,12})?"
}

fn fields() -> impl Strategy<Value = MessageFields> {
    (text(), text(), text()).prop_map(|(s, r, b)| MessageFields::new(s, r, b))
}

fn has_content(fields: &MessageFields) -> bool {
    !(is_blank(&fields.subject) && is_blank(&fields.recipient_email) && is_blank(&fields.body))
}

fn is_complete(fields: &MessageFields) -> bool {
    !is_blank(&fields.subject) && !is_blank(&fields.recipient_email) && !is_blank(&fields.body)
}

fn complete_fields() -> impl Strategy<Value = MessageFields> {
    (filled(), filled(), filled()).prop_map(|(s, r, b)| MessageFields::new(s, r, b))
}

proptest! {
    #[test]
    fn all_blank_drafts_never_reach_the_gateway(
        subject in blank(),
        recipient in blank(),
        body in blank(),
    ) {
        let backend = FakeBackend::new();
        let session = backend.session_for(ALICE);
        let mut drafts = DraftManager::new(backend.clone());
        let fields = MessageFields::new(subject, recipient, body);

        runtime().block_on(async {
            let created = drafts.create(&session, fields.clone()).await;
            prop_assert!(created.unwrap_err().is_validation());

            let updated = drafts
                .update(&session, DraftId::new(1), fields)
                .await;
            prop_assert!(updated.unwrap_err().is_validation());
            Ok(())
        })?;

        prop_assert_eq!(backend.calls(), 0);
        prop_assert_eq!(backend.draft_count(), 0);
    }

    #[test]
    fn drafts_with_content_round_trip(fields in fields()) {
        prop_assume!(has_content(&fields));

        let backend = FakeBackend::new();
        let session = backend.session_for(ALICE);
        let mut drafts = DraftManager::new(backend.clone());

        runtime().block_on(async {
            let created = drafts.create(&session, fields.clone()).await.unwrap();
            let fetched = drafts.get(&session, created.draft_id).await.unwrap();
            prop_assert_eq!(&fetched.fields, &fields);
            prop_assert_eq!(fetched, created);
            Ok(())
        })?;
    }

    #[test]
    fn incomplete_messages_are_never_sent(fields in fields()) {
        prop_assume!(!is_complete(&fields));

        let backend = FakeBackend::new();
        let session = backend.session_for(ALICE);
        let mut mailbox = MailboxManager::new(backend.clone());
        let mut drafts = DraftManager::new(backend.clone());

        runtime().block_on(async {
            prop_assert!(mailbox.send(&session, fields.clone()).await.unwrap_err().is_validation());

            if has_content(&fields) {
                let draft = drafts.create(&session, fields.clone()).await.unwrap();
                prop_assert!(drafts.send(&session, draft.draft_id).await.unwrap_err().is_validation());
                prop_assert!(drafts.cached(draft.draft_id).is_some());
            }
            Ok(())
        })?;

        prop_assert_eq!(backend.email_count(), 0);
        prop_assert_eq!(backend.draft_count(), usize::from(has_content(&fields)));
    }

    #[test]
    fn complete_messages_are_sent(fields in complete_fields()) {
        let backend = FakeBackend::new();
        let session = backend.session_for(ALICE);
        let mut drafts = DraftManager::new(backend.clone());

        runtime().block_on(async {
            let draft = drafts.create(&session, fields.clone()).await.unwrap();
            let email = drafts.send(&session, draft.draft_id).await.unwrap();
            prop_assert_eq!(email.fields(), fields.clone());
            prop_assert!(drafts.cached(draft.draft_id).is_none());
            Ok(())
        })?;

        prop_assert_eq!(backend.draft_count(), 0);
        prop_assert_eq!(backend.email_count(), 1);
    }
}
