//! Fixed-layout message serial.
//!
//! A message is a single 512-byte block; every field is a named slice of it
//! so the message is always serialized and ready to send, with no copies.
//!
//! Layout (not to scale):
//!
//! ```text
//! +-------------------------------------------------------------------------+
//! |                            Message (4096 bits)                          |
//! +-------------------------------------------------------------------------+
//! |           payloadA (2048 bits)      |      payloadB (2048 bits)         |
//! +-----------------------------+-------+---------------------------+-------+
//! |      contents (3192 bits)   |    associatedData (896 bits)      |grpByte|
//! +-----------------------------+-------------+-------+-----------+-+-------+
//! |                             | recipientID | keyFP | timestamp |mac|     |
//! |                             |  256 bits   | 256 b |  128 bits |256|8 bit|
//! +-----------------------------+-------------+-------+-----------+---+-----+
//! ```
//!
//! The group byte is held at zero so that payload B stays inside the cyclic
//! group used for encryption.

/// Length of the entire message serial in bytes.
pub const TOTAL_LEN: usize = 512; // 4096 bits

/// Length of each payload half in bytes.
pub const PAYLOAD_LEN: usize = 256; // 2048 bits

/// Length of the message contents in bytes.
pub const CONTENTS_LEN: usize = 399; // 3192 bits

/// Lengths of the associated-data fields in bytes.
pub const RECIPIENT_ID_LEN: usize = 32;
pub const KEY_FP_LEN: usize = 32;
pub const TIMESTAMP_LEN: usize = 16;
pub const MAC_LEN: usize = 32;

const PAYLOAD_A_START: usize = 0;
const PAYLOAD_A_END: usize = PAYLOAD_A_START + PAYLOAD_LEN;
const PAYLOAD_B_START: usize = PAYLOAD_A_END;
const PAYLOAD_B_END: usize = PAYLOAD_B_START + PAYLOAD_LEN;

const CONTENTS_START: usize = 0;
const CONTENTS_END: usize = CONTENTS_START + CONTENTS_LEN;

const RECIPIENT_ID_START: usize = CONTENTS_END;
const RECIPIENT_ID_END: usize = RECIPIENT_ID_START + RECIPIENT_ID_LEN;
const KEY_FP_START: usize = RECIPIENT_ID_END;
const KEY_FP_END: usize = KEY_FP_START + KEY_FP_LEN;
const TIMESTAMP_START: usize = KEY_FP_END;
const TIMESTAMP_END: usize = TIMESTAMP_START + TIMESTAMP_LEN;
const MAC_START: usize = TIMESTAMP_END;
const MAC_END: usize = MAC_START + MAC_LEN;

const GRP_BYTE_START: usize = MAC_END;
const GRP_BYTE_END: usize = GRP_BYTE_START + 1;

const _: () = assert!(GRP_BYTE_END == TOTAL_LEN);

/// Message block storing all fields serially; accessors expose the named
/// slices. Mis-sized writes are programmer errors and panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    master: [u8; TOTAL_LEN],
}

impl Message {
    /// Create a new zeroed message; the group byte starts (and stays) zero.
    pub fn new() -> Self {
        Message {
            master: [0u8; TOTAL_LEN],
        }
    }

    /// The entire serialized message.
    pub fn master(&self) -> &[u8] {
        &self.master
    }

    /// Payload A, the first half of the message.
    pub fn payload_a(&self) -> &[u8] {
        &self.master[PAYLOAD_A_START..PAYLOAD_A_END]
    }

    /// Copy `payload` into payload A.
    ///
    /// # Panics
    ///
    /// Panics unless `payload` is exactly [`PAYLOAD_LEN`] bytes.
    pub fn set_payload_a(&mut self, payload: &[u8]) {
        assert_eq!(
            payload.len(),
            PAYLOAD_LEN,
            "payload A must be exactly {PAYLOAD_LEN} bytes"
        );
        self.master[PAYLOAD_A_START..PAYLOAD_A_END].copy_from_slice(payload);
    }

    /// Payload B, the last half of the message.
    pub fn payload_b(&self) -> &[u8] {
        &self.master[PAYLOAD_B_START..PAYLOAD_B_END]
    }

    /// Copy `payload` into payload B.
    ///
    /// # Panics
    ///
    /// Panics unless `payload` is exactly [`PAYLOAD_LEN`] bytes.
    pub fn set_payload_b(&mut self, payload: &[u8]) {
        assert_eq!(
            payload.len(),
            PAYLOAD_LEN,
            "payload B must be exactly {PAYLOAD_LEN} bytes"
        );
        self.master[PAYLOAD_B_START..PAYLOAD_B_END].copy_from_slice(payload);
    }

    /// Payload B arranged for encryption: the first byte is swapped to the
    /// end and replaced with zero, keeping the value inside the group.
    pub fn payload_b_for_encryption(&self) -> [u8; PAYLOAD_LEN] {
        let mut copy = [0u8; PAYLOAD_LEN];
        copy.copy_from_slice(self.payload_b());
        copy[PAYLOAD_LEN - 1] = copy[0];
        copy[0] = 0;
        copy
    }

    /// Store a decrypted payload B, undoing the rearrangement performed by
    /// [`Message::payload_b_for_encryption`]: the last byte moves back to
    /// the front and the last byte becomes zero. Assumes the payload is in
    /// the group, so its first byte is zero.
    ///
    /// # Panics
    ///
    /// Panics unless `new_payload` is exactly [`PAYLOAD_LEN`] bytes.
    pub fn set_decrypted_payload_b(&mut self, new_payload: &[u8]) {
        assert_eq!(
            new_payload.len(),
            PAYLOAD_LEN,
            "payload B must be exactly {PAYLOAD_LEN} bytes"
        );
        self.master[PAYLOAD_B_START..PAYLOAD_B_END].copy_from_slice(new_payload);
        self.master[PAYLOAD_B_START] = self.master[PAYLOAD_B_END - 1];
        self.master[PAYLOAD_B_END - 1] = 0;
    }

    /// The message contents.
    pub fn contents(&self) -> &[u8] {
        &self.master[CONTENTS_START..CONTENTS_END]
    }

    /// Copy `contents` into the contents slice.
    ///
    /// # Panics
    ///
    /// Panics unless `contents` is exactly [`CONTENTS_LEN`] bytes.
    pub fn set_contents(&mut self, contents: &[u8]) {
        assert_eq!(
            contents.len(),
            CONTENTS_LEN,
            "contents must be exactly {CONTENTS_LEN} bytes"
        );
        self.master[CONTENTS_START..CONTENTS_END].copy_from_slice(contents);
    }

    /// The recipient ID field of the associated data.
    pub fn recipient_id(&self) -> &[u8] {
        &self.master[RECIPIENT_ID_START..RECIPIENT_ID_END]
    }

    /// # Panics
    ///
    /// Panics unless `id` is exactly [`RECIPIENT_ID_LEN`] bytes.
    pub fn set_recipient_id(&mut self, id: &[u8]) {
        assert_eq!(
            id.len(),
            RECIPIENT_ID_LEN,
            "recipient ID must be exactly {RECIPIENT_ID_LEN} bytes"
        );
        self.master[RECIPIENT_ID_START..RECIPIENT_ID_END].copy_from_slice(id);
    }

    /// The key fingerprint field of the associated data.
    pub fn key_fp(&self) -> &[u8] {
        &self.master[KEY_FP_START..KEY_FP_END]
    }

    /// # Panics
    ///
    /// Panics unless `fp` is exactly [`KEY_FP_LEN`] bytes.
    pub fn set_key_fp(&mut self, fp: &[u8]) {
        assert_eq!(
            fp.len(),
            KEY_FP_LEN,
            "key fingerprint must be exactly {KEY_FP_LEN} bytes"
        );
        self.master[KEY_FP_START..KEY_FP_END].copy_from_slice(fp);
    }

    /// The timestamp field of the associated data.
    pub fn timestamp(&self) -> &[u8] {
        &self.master[TIMESTAMP_START..TIMESTAMP_END]
    }

    /// # Panics
    ///
    /// Panics unless `timestamp` is exactly [`TIMESTAMP_LEN`] bytes.
    pub fn set_timestamp(&mut self, timestamp: &[u8]) {
        assert_eq!(
            timestamp.len(),
            TIMESTAMP_LEN,
            "timestamp must be exactly {TIMESTAMP_LEN} bytes"
        );
        self.master[TIMESTAMP_START..TIMESTAMP_END].copy_from_slice(timestamp);
    }

    /// The MAC field of the associated data.
    pub fn mac(&self) -> &[u8] {
        &self.master[MAC_START..MAC_END]
    }

    /// # Panics
    ///
    /// Panics unless `mac` is exactly [`MAC_LEN`] bytes.
    pub fn set_mac(&mut self, mac: &[u8]) {
        assert_eq!(mac.len(), MAC_LEN, "MAC must be exactly {MAC_LEN} bytes");
        self.master[MAC_START..MAC_END].copy_from_slice(mac);
    }
}

impl Default for Message {
    fn default() -> Self {
        Message::new()
    }
}
