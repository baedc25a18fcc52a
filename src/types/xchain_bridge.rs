//! Cross-chain bridge tuples
//!
//! A bridge names the door account and asset on both chains. Each door
//! account is preceded by a one-byte length marker (always 20) so the
//! variable-width issues that follow stay unambiguous:
//!
//! ```text
//! [0x14][LockingChainDoor][LockingChainIssue][0x14][IssuingChainDoor][IssuingChainIssue]
//! ```

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::account::AccountId;
use crate::types::issue::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XChainBridge {
    pub locking_chain_door: AccountId,
    pub locking_chain_issue: Issue,
    pub issuing_chain_door: AccountId,
    pub issuing_chain_issue: Issue,
}

fn read_door(field: &FieldDefinition, parser: &mut BinaryParser<'_>) -> CodecResult<AccountId> {
    let bytes = parser.read_vl_bytes()?;
    AccountId::from_slice(bytes).ok_or_else(|| CodecError::TypeMismatch {
        field: field.name.clone(),
        expected: "20-byte door account",
    })
}

impl XChainBridge {
    pub fn from_parser(field: &FieldDefinition, parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let locking_chain_door = read_door(field, parser)?;
        let locking_chain_issue = Issue::from_parser(parser)?;
        let issuing_chain_door = read_door(field, parser)?;
        let issuing_chain_issue = Issue::from_parser(parser)?;
        Ok(Self {
            locking_chain_door,
            locking_chain_issue,
            issuing_chain_door,
            issuing_chain_issue,
        })
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let map = json.as_object().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "bridge object",
        })?;
        let get = |key: &'static str| {
            map.get(key).ok_or_else(|| CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "bridge object with both doors and issues",
            })
        };
        Ok(Self {
            locking_chain_door: AccountId::from_json(get("LockingChainDoor")?)?,
            locking_chain_issue: Issue::from_json(field, get("LockingChainIssue")?)?,
            issuing_chain_door: AccountId::from_json(get("IssuingChainDoor")?)?,
            issuing_chain_issue: Issue::from_json(field, get("IssuingChainIssue")?)?,
        })
    }

    pub fn to_bytes(&self, sink: &mut BytesList) -> CodecResult<()> {
        sink.put_vl(self.locking_chain_door.as_bytes())?;
        self.locking_chain_issue.to_bytes(sink);
        sink.put_vl(self.issuing_chain_door.as_bytes())?;
        self.issuing_chain_issue.to_bytes(sink);
        Ok(())
    }

    pub fn to_json(&self) -> Json {
        let mut map = serde_json::Map::new();
        map.insert("LockingChainDoor".into(), self.locking_chain_door.to_json());
        map.insert("LockingChainIssue".into(), self.locking_chain_issue.to_json());
        map.insert("IssuingChainDoor".into(), self.issuing_chain_door.to_json());
        map.insert("IssuingChainIssue".into(), self.issuing_chain_issue.to_json());
        Json::Object(map)
    }
}
