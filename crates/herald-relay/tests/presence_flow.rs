//! Auto-teardown behavior through `Relay::handle_presence`.

mod common;

use std::sync::atomic::Ordering;

use common::{bots_only_update, harness, user_message};
use herald_types::{ChannelOccupancy, Occupant, Reply, VoicePresenceUpdate};

#[tokio::test]
async fn teardown_when_last_human_leaves_is_chat_silent() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();

    h.relay.handle_presence(&bots_only_update("v1")).await;

    assert!(h.sink.sent().is_empty());
    assert_eq!(h.drivers[0].disconnects.load(Ordering::SeqCst), 1);
    assert!(h.pool.find_tracking("v1").await.is_none());
}

#[tokio::test]
async fn teardown_fires_exactly_once() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();

    h.relay.handle_presence(&bots_only_update("v1")).await;
    h.relay.handle_presence(&bots_only_update("v1")).await;

    assert_eq!(h.drivers[0].disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_teardown_notifies_the_bound_text_channel() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();
    h.drivers[0].fail_disconnect.store(true, Ordering::SeqCst);

    h.relay.handle_presence(&bots_only_update("v1")).await;

    let (channel, reply) = h.sink.only_reply();
    assert_eq!(channel, "t1");
    assert_eq!(
        reply,
        Reply::text("error: automatic disconnect failed; try ^dc")
    );
    // The session survives a failed platform disconnect.
    assert!(h.pool.find_tracking("v1").await.is_some());
}

#[tokio::test]
async fn fully_empty_channel_does_not_tear_down() {
    // The speaker's own departure arrives as an empty channel; tearing down
    // again would double-disconnect.
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();

    let update = VoicePresenceUpdate {
        guild_id: "g1".to_string(),
        user_id: "u1".to_string(),
        old_channel: Some(ChannelOccupancy {
            channel_id: "v1".to_string(),
            members: vec![],
        }),
        new_channel_id: None,
    };
    h.relay.handle_presence(&update).await;

    assert!(h.sink.sent().is_empty());
    assert_eq!(h.drivers[0].disconnects.load(Ordering::SeqCst), 0);
    assert!(h.pool.find_tracking("v1").await.is_some());
}

#[tokio::test]
async fn humans_remaining_keep_the_session() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();

    let update = VoicePresenceUpdate {
        guild_id: "g1".to_string(),
        user_id: "u2".to_string(),
        old_channel: Some(ChannelOccupancy {
            channel_id: "v1".to_string(),
            members: vec![
                Occupant {
                    user_id: "u3".to_string(),
                    is_bot: false,
                },
                Occupant {
                    user_id: "bot1".to_string(),
                    is_bot: true,
                },
            ],
        }),
        new_channel_id: None,
    };
    h.relay.handle_presence(&update).await;

    assert_eq!(h.drivers[0].disconnects.load(Ordering::SeqCst), 0);
    assert!(h.pool.find_tracking("v1").await.is_some());
}

#[tokio::test]
async fn movement_between_untracked_channels_is_ignored() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();

    let mut update = bots_only_update("v9");
    update.new_channel_id = Some("v8".to_string());
    h.relay.handle_presence(&update).await;

    assert!(h.sink.sent().is_empty());
    assert_eq!(h.drivers[0].disconnects.load(Ordering::SeqCst), 0);
    assert!(h.pool.find_tracking("v1").await.is_some());
}

#[tokio::test]
async fn fresh_joins_are_ignored() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.sink.clear();

    let update = VoicePresenceUpdate {
        guild_id: "g1".to_string(),
        user_id: "u2".to_string(),
        old_channel: None,
        new_channel_id: Some("v1".to_string()),
    };
    h.relay.handle_presence(&update).await;

    assert!(h.sink.sent().is_empty());
    assert!(h.pool.find_tracking("v1").await.is_some());
}

#[tokio::test]
async fn channel_can_be_rebound_after_teardown() {
    let h = harness(1);
    h.relay
        .handle_message(&user_message("t1", "^con", Some("v1")))
        .await;
    h.relay.handle_presence(&bots_only_update("v1")).await;
    h.sink.clear();

    h.relay
        .handle_message(&user_message("t2", "^con", Some("v1")))
        .await;

    assert_eq!(h.sink.only_text(), "now reading this channel aloud");
    let session = h.pool.speakers()[0].session().await.unwrap();
    assert_eq!(session.text_channel_id, "t2");
}
