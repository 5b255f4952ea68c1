//! 状態遷移が返した `Delivery` を MessagePusher に流す

use hiroba_shared::time::Clock;

use crate::domain::{ConnectionId, Delivery, MessagePusher, Timestamp};

/// 時計から現在時刻を取る
pub(crate) fn now(clock: &dyn Clock) -> Timestamp {
    Timestamp::new(clock.now_millis())
}

/// 配信を順番に実行する（失敗はログに残して続行）
///
/// 宛先が 1 つだけの配信（履歴の再送など）は `push_to`、それ以外は `broadcast` で送ります。
pub(crate) async fn deliver(message_pusher: &dyn MessagePusher, deliveries: Vec<Delivery>) {
    for delivery in deliveries {
        let result = match delivery.recipients.len() {
            0 => continue,
            1 => {
                message_pusher
                    .push_to(&delivery.recipients[0], &delivery.notification)
                    .await
            }
            _ => {
                message_pusher
                    .broadcast(delivery.recipients, &delivery.notification)
                    .await
            }
        };
        if let Err(e) = result {
            tracing::warn!("Failed to deliver {:?}: {}", delivery.notification, e);
        }
    }
}

/// 全ての配信先（重複なし、最初に現れた順）
pub(crate) fn recipients_of(deliveries: &[Delivery]) -> Vec<ConnectionId> {
    let mut recipients: Vec<ConnectionId> = Vec::new();
    for connection in deliveries.iter().flat_map(|d| d.recipients.iter()) {
        if !recipients.contains(connection) {
            recipients.push(*connection);
        }
    }
    recipients
}
