//! Packing of notification data into size-bounded CSV batches.
//!
//! Each notification becomes one CSV line carrying the base64 of its message
//! hash and identity fingerprint. The packer stops before a line would push
//! the batch past the size limit and hands back the entries that did not fit.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::PrimitivesError;
use crate::round::RoundId;

/// One notification to be delivered to a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationData {
    pub ephemeral_id: i64,
    pub round_id: RoundId,
    pub identity_fp: Vec<u8>,
    pub message_hash: Vec<u8>,
}

/// Pack as many notifications as fit into `max_size` bytes of CSV, one line
/// per entry. Returns the encoded batch and the tail of entries that did
/// not fit.
pub fn build_notification_csv(
    nd_list: &[NotificationData],
    max_size: usize,
) -> Result<(Vec<u8>, &[NotificationData]), PrimitivesError> {
    let mut buf = Vec::new();
    let mut num_written = 0;

    for nd in nd_list {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            BASE64.encode(&nd.message_hash),
            BASE64.encode(&nd.identity_fp),
        ])?;
        let line = writer
            .into_inner()
            .map_err(|err| PrimitivesError::Notifications(err.to_string()))?;

        if buf.len() + line.len() > max_size {
            break;
        }

        buf.extend_from_slice(&line);
        num_written += 1;
    }

    Ok((buf, &nd_list[num_written..]))
}

/// Decode a notification CSV batch. The IDs not carried by the wire form
/// come back zeroed.
pub fn decode_notifications_csv(
    data: &str,
) -> Result<Vec<NotificationData>, PrimitivesError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data.as_bytes());

    let mut list = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (Some(message_hash), Some(identity_fp)) = (record.get(0), record.get(1)) else {
            return Err(PrimitivesError::Notifications(
                "CSV record is missing a column".into(),
            ));
        };
        list.push(NotificationData {
            ephemeral_id: 0,
            round_id: 0,
            identity_fp: BASE64.decode(identity_fp)?,
            message_hash: BASE64.decode(message_hash)?,
        });
    }

    Ok(list)
}
