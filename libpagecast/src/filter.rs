//! Selection of messages newer than the checkpoint

use chrono::{DateTime, Utc};

use crate::types::SourceMessage;

/// Return the messages strictly newer than the checkpoint, in source order
///
/// A message whose timestamp exactly equals the checkpoint is excluded; the
/// checkpoint records "everything up to and including this instant has been
/// seen".
pub fn select_new(batch: &[SourceMessage], checkpoint: DateTime<Utc>) -> Vec<SourceMessage> {
    batch
        .iter()
        .filter(|message| message.date > checkpoint)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn msg(id: i32, date: DateTime<Utc>) -> SourceMessage {
        SourceMessage::new(id, date, format!("message {}", id), false)
    }

    #[test]
    fn test_strictly_newer_selected() {
        let checkpoint = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let batch = vec![
            msg(1, checkpoint - Duration::seconds(10)),
            msg(2, checkpoint - Duration::seconds(5)),
            msg(3, checkpoint + Duration::seconds(5)),
        ];

        let selected = select_new(&batch, checkpoint);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 3);
    }

    #[test]
    fn test_boundary_equal_excluded() {
        let checkpoint = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let batch = vec![msg(1, checkpoint)];

        assert!(select_new(&batch, checkpoint).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let checkpoint = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        // Telegram history batches arrive newest first; whatever the source
        // order was must survive filtering.
        let batch = vec![
            msg(5, checkpoint + Duration::seconds(50)),
            msg(4, checkpoint + Duration::seconds(40)),
            msg(3, checkpoint - Duration::seconds(30)),
            msg(2, checkpoint + Duration::seconds(20)),
        ];

        let selected = select_new(&batch, checkpoint);
        let ids: Vec<i32> = selected.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 4, 2]);
    }

    #[test]
    fn test_empty_batch() {
        let checkpoint = Utc::now();
        assert!(select_new(&[], checkpoint).is_empty());
    }

    #[test]
    fn test_all_newer_selected() {
        let checkpoint = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let batch = vec![
            msg(1, checkpoint + Duration::seconds(1)),
            msg(2, checkpoint + Duration::seconds(2)),
        ];

        assert_eq!(select_new(&batch, checkpoint).len(), 2);
    }
}
