use crate::{Message, MessageType, ProtocolError, Result, MAX_MESSAGE_SIZE};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Codec for encoding/decoding messages with length-prefixed framing
///
/// Frame format: [4-byte length (big-endian)] [1-byte message type] [payload]
///
/// The length covers the type byte and the payload.
pub struct MessageCodec;

impl Decoder for MessageCodec {
    type Item = Message;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        // Length prefix not fully buffered yet
        if src.len() < 4 {
            return Ok(None);
        }

        // Peek at the length; nothing is consumed until the frame is complete
        let mut length_bytes = [0u8; 4];
        length_bytes.copy_from_slice(&src[0..4]);
        let length = u32::from_be_bytes(length_bytes) as usize;

        // A frame always carries at least the type byte
        if length == 0 {
            return Err(ProtocolError::EmptyFrame);
        }

        if length > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge(length));
        }

        // Partial frame, wait for more bytes
        if src.len() < 4 + length {
            src.reserve(4 + length - src.len());
            return Ok(None);
        }

        src.advance(4); // length prefix

        // Consume the whole frame even when the type byte is unknown
        let msg_type_byte = src.get_u8();
        let payload = src.split_to(length - 1);

        let msg_type = MessageType::from_u8(msg_type_byte)
            .ok_or(ProtocolError::InvalidMessageType(msg_type_byte))?;

        let message = match msg_type {
            // Requests
            MessageType::SendTask => Message::SendTask(bincode::deserialize(&payload)?),
            MessageType::Revoke => Message::Revoke(bincode::deserialize(&payload)?),
            MessageType::InspectActive => Message::InspectActive(bincode::deserialize(&payload)?),
            // Replies
            MessageType::ActiveReport => Message::ActiveReport(bincode::deserialize(&payload)?),
            MessageType::Ack => Message::Ack(bincode::deserialize(&payload)?),
            MessageType::Nack => Message::Nack(bincode::deserialize(&payload)?),
        };

        Ok(Some(message))
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<()> {
        // Serialize the body first; its size decides the prefix
        let payload = match &item {
            Message::SendTask(req) => bincode::serialize(req)?,
            Message::Revoke(req) => bincode::serialize(req)?,
            Message::InspectActive(req) => bincode::serialize(req)?,
            Message::ActiveReport(resp) => bincode::serialize(resp)?,
            Message::Ack(resp) => bincode::serialize(resp)?,
            Message::Nack(resp) => bincode::serialize(resp)?,
        };

        let total_length = 1 + payload.len(); // type byte + payload
        if total_length > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge(total_length));
        }

        dst.reserve(4 + total_length);

        // [len][type][payload]
        dst.put_u32(total_length as u32);
        dst.put_u8(item.message_type().as_u8());
        dst.put_slice(&payload);

        Ok(())
    }
}
