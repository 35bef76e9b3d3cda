use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};

use onerecord_diff::OperationKind;
use onerecord_types::vocab::{api_class, api_property, ID_KEY, TYPE_KEY};
use onerecord_types::EntityRef;

/// Operation code as sent on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpCode {
    Add,
    Del,
}

impl OpCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Del => "del",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OperationKind> for OpCode {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Add => Self::Add,
            OperationKind::Delete => Self::Del,
        }
    }
}

/// The object of an operation: wire datatype plus literal value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationObject {
    pub datatype: String,
    pub value: String,
}

/// One add/del operation on a predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operation")]
    pub op: OpCode,
    pub predicate: String,
    pub value: OperationObject,
}

impl Operation {
    fn to_jsonld(&self) -> Json {
        json!({
            TYPE_KEY: [api_class("Operation")],
            api_property("Operation", "op"): self.op.as_str(),
            api_property("Operation", "p"): self.predicate,
            api_property("Operation", "o"): {
                TYPE_KEY: [api_class("OperationObject")],
                api_property("OperationObject", "datatype"): self.value.datatype,
                api_property("OperationObject", "value"): self.value.value,
            },
        })
    }
}

/// A change request against one logistics object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
    pub target: EntityRef,
    pub requestor: String,
    pub revision: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operations: Vec<Operation>,
}

impl PatchRequest {
    /// Attach the reason for the change.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Render the request as a JSON-LD document in the ONE Record API
    /// vocabulary.
    pub fn to_jsonld(&self) -> Json {
        let mut doc = json!({
            TYPE_KEY: [api_class("PatchRequest")],
            api_property("PatchRequest", "logisticsObjectRef"): {
                TYPE_KEY: [api_class("LogisticsObjectRef")],
                api_property("LogisticsObjectRef", "logisticsObjectId"): { ID_KEY: self.target.identity },
                api_property("LogisticsObjectRef", "logisticsObjectType"): self.target.type_id,
            },
            api_property("PatchRequest", "operations"):
                self.operations.iter().map(Operation::to_jsonld).collect::<Vec<_>>(),
            api_property("PatchRequest", "requestorCompanyIdentifier"): self.requestor,
            api_property("PatchRequest", "revision"): self.revision,
        });
        if let (Some(description), Some(object)) = (&self.description, doc.as_object_mut()) {
            object.insert(
                api_property("PatchRequest", "description"),
                Json::String(description.clone()),
            );
        }
        doc
    }
}
