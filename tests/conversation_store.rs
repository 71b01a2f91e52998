mod common;

use std::sync::Arc;

use common::{
    collection, conversation_json, envelope, scripted_client, RecordingDispatcher,
    ScriptedTransport,
};
use entity_store::client::{ClientError, Method};
use entity_store::entity::EntityId;
use entity_store::mvi::Reducer;
use entity_store::resources::{Conversation, ConversationStore, MarkAsRead, RESOURCE};
use entity_store::root::RootStore;
use entity_store::store::{CollectionState, EntityIntent, ErrorKind, Phase, Transition};
use serde_json::json;
use uuid::Uuid;

fn setup() -> (Arc<ScriptedTransport>, ConversationStore, RootStore) {
    let transport = ScriptedTransport::new();
    let store = ConversationStore::new(scripted_client(RESOURCE, transport.clone())).unwrap();
    let root = RootStore::builder()
        .register(store.reducer())
        .unwrap()
        .build();
    (transport, store, root)
}

fn conversation(id: i64, title: &str, unread: u32) -> Conversation {
    serde_json::from_value(conversation_json(id, title, unread)).unwrap()
}

#[test]
fn actions_include_mark_as_read() {
    let (_, store, _) = setup();
    assert_eq!(
        store.actions(),
        vec!["fetchAll", "create", "update", "remove", "markAsRead"]
    );
}

#[tokio::test]
async fn mark_as_read_patches_unread_count_and_caches_result() {
    let (transport, store, root) = setup();
    transport.reply(collection(json!([
        conversation_json(1, "Support", 3),
        conversation_json(2, "Sales", 1)
    ])));
    store.fetch_all(&root).await.unwrap();

    transport.reply(envelope(conversation_json(1, "Support", 0)));
    let updated = store.mark_as_read(&root, 1).await.unwrap();

    assert_eq!(updated.unread_count, 0);
    assert_eq!(store.select_by_id(&root, 1), Some(conversation(1, "Support", 0)));
    assert_eq!(store.select_by_id(&root, 2).unwrap().unread_count, 1);

    let request = transport.requests().pop().unwrap();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.url, "http://api.test/api/v1/conversations/1");
    assert_eq!(request.body, Some(json!({"unreadCount": 0})));
}

#[tokio::test]
async fn mark_as_read_dispatches_its_own_action_type() {
    let (transport, store, _) = setup();
    let spy = RecordingDispatcher::new();

    transport.reply(envelope(conversation_json(4, "Billing", 0)));
    store.mark_as_read(&spy, 4).await.unwrap();

    assert_eq!(
        spy.action_types(),
        vec![
            "conversations/markAsRead/pending",
            "conversations/markAsRead/fulfilled",
        ]
    );
    assert!(matches!(
        &spy.transitions()[0].intent,
        EntityIntent::Extension { name, phase: Phase::Requested(arg) }
            if name == "markAsRead" && arg == &json!(4)
    ));
}

#[tokio::test]
async fn mark_as_read_failure_is_named_after_the_action() {
    let (transport, store, root) = setup();
    transport.fail(ClientError::Status {
        status: 404,
        body: String::new(),
    });

    let err = store.mark_as_read(&root, 9).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Extension("markAsRead".to_string()));
    assert_eq!(err.name(), "MarkAsReadError");
    assert_eq!(err.message, "Request failed with status code 404");
    assert!(store.select_error(&root).is_none());
    assert!(store.select_all(&root).is_empty());
}

#[tokio::test]
async fn mark_as_read_failure_without_message_uses_default() {
    let (transport, store, root) = setup();
    transport.fail(ClientError::Network(String::new()));

    let err = store.mark_as_read(&root, 9).await.unwrap_err();
    assert_eq!(err.message, "Failed to mark conversation as read");
}

#[tokio::test]
async fn unknown_action_fails_without_dispatching() {
    let (transport, store, _) = setup();
    let spy = RecordingDispatcher::<Conversation>::new();

    let err = store
        .run_extension(&spy, "archive", json!(1))
        .await
        .unwrap_err();

    assert_eq!(err.name(), "ArchiveError");
    assert!(spy.transitions().is_empty());
    assert!(transport.requests().is_empty());
}

#[test]
fn extension_patch_is_independent_of_unrelated_transitions() {
    let (_, store, _) = setup();
    let reducer = store.reducer();
    let read = conversation(1, "Support", 0);

    let mark = Transition::new(
        RESOURCE,
        Uuid::new_v4(),
        EntityIntent::Extension {
            name: MarkAsRead::ACTION.to_string(),
            phase: Phase::Succeeded(read.clone()),
        },
    );
    let unrelated = Transition::new(
        "contacts",
        Uuid::new_v4(),
        EntityIntent::Remove(Phase::Succeeded(EntityId::Int(1))),
    );
    let pending = Transition::new(
        RESOURCE,
        Uuid::new_v4(),
        EntityIntent::<Conversation>::Update(Phase::Requested((EntityId::Int(2), json!({})))),
    );

    let direct = reducer.reduce(CollectionState::default(), &mark);

    let mut interleaved = CollectionState::default();
    for transition in [&unrelated, &pending, &mark, &unrelated] {
        interleaved = reducer.reduce(interleaved, transition);
    }

    assert_eq!(direct, interleaved);
    assert_eq!(direct.select_by_id(&EntityId::Int(1)), Some(&read));
}

#[tokio::test]
async fn registered_conversations_render_as_json() {
    let (transport, store, root) = setup();
    transport.reply(collection(json!([conversation_json(7, "Ops", 2)])));
    store.fetch_all(&root).await.unwrap();

    let snapshot = root.to_json();
    assert_eq!(snapshot["conversations"]["records"]["7"]["unreadCount"], json!(2));
    assert_eq!(snapshot["conversations"]["loading"], json!(false));
}
