//! Wire records exchanged with the test-management service.
//!
//! Upstream payloads are loosely shaped: references to groups, subgroups and
//! tests arrive either as a bare id or as an embedded document carrying `_id`.
//! Everything is normalized here so the domain types only ever see one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use testdesk_core::model::{
    Group, GroupId, NewSession, NewTestCase, Session, SessionId, SubGroup, SubGroupId, TestCase,
    TestId, TestResult, TestUpdate, UserId,
};

use crate::repository::StorageError;

/// A reference to another document: either its id or the document itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RefField {
    Id(String),
    Embedded {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl RefField {
    /// The referenced id, or `None` when it is blank.
    pub(crate) fn id(&self) -> Option<&str> {
        let raw = match self {
            RefField::Id(id) | RefField::Embedded { id } => id.trim(),
        };
        (!raw.is_empty()).then_some(raw)
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn require_id(field: &'static str, raw: &str) -> Result<String, StorageError> {
    non_empty(Some(raw))
        .map(str::to_owned)
        .ok_or_else(|| StorageError::InvalidRecord(format!("missing {field}")))
}

fn require_ref(field: &'static str, raw: &RefField) -> Result<String, StorageError> {
    raw.id()
        .map(str::to_owned)
        .ok_or_else(|| StorageError::InvalidRecord(format!("missing {field}")))
}

// ─── Groups ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "nome", alias = "name", default)]
    name: String,
}

impl GroupRecord {
    pub(crate) fn into_group(self) -> Result<Group, StorageError> {
        Ok(Group::new(GroupId::new(require_id("group _id", &self.id)?), self.name))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubGroupRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "nome", alias = "name", default)]
    name: String,
    #[serde(default)]
    grupo_id: Option<String>,
    #[serde(default)]
    grupo: Option<RefField>,
}

impl SubGroupRecord {
    /// Fold both parent shapes into the canonical `group_id`.
    ///
    /// The flat `grupoId` wins when a record carries both.
    pub(crate) fn into_sub_group(self) -> Result<SubGroup, StorageError> {
        let id = SubGroupId::new(require_id("subgroup _id", &self.id)?);
        let group_id = non_empty(self.grupo_id.as_deref())
            .or_else(|| self.grupo.as_ref().and_then(RefField::id))
            .map(GroupId::new);
        Ok(SubGroup::new(id, self.name, group_id))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestRecord {
    #[serde(rename = "_id")]
    id: String,
    grupo: RefField,
    sub_grupo: RefField,
    #[serde(default)]
    caso_de_uso: String,
    #[serde(default)]
    descricao: Option<String>,
    #[serde(default)]
    resultado: Option<String>,
    #[serde(default)]
    observacao: Option<String>,
}

impl TestRecord {
    pub(crate) fn into_test(self) -> Result<TestCase, StorageError> {
        let id = TestId::new(require_id("test _id", &self.id)?);
        let group_id = GroupId::new(require_ref("test grupo", &self.grupo)?);
        let sub_group_id = SubGroupId::new(require_ref("test subGrupo", &self.sub_grupo)?);
        let result = match non_empty(self.resultado.as_deref()) {
            Some(label) => label
                .parse::<TestResult>()
                .map_err(|e| StorageError::InvalidRecord(e.to_string()))?,
            None => TestResult::NotTested,
        };
        Ok(
            TestCase::new(id, group_id, sub_group_id, self.caso_de_uso)
                .with_description(self.descricao.filter(|d| !d.trim().is_empty()))
                .with_result(result)
                .with_observation(self.observacao.unwrap_or_default()),
        )
    }
}

/// Outbound shape of a test, embedded in session payloads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestPayload<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    grupo: &'a str,
    sub_grupo: &'a str,
    caso_de_uso: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    descricao: Option<&'a str>,
    resultado: &'a str,
    observacao: &'a str,
}

impl<'a> TestPayload<'a> {
    pub(crate) fn from_test(test: &'a TestCase) -> Self {
        Self {
            id: test.id().as_str(),
            grupo: test.group_id().as_str(),
            sub_grupo: test.sub_group_id().as_str(),
            caso_de_uso: test.use_case(),
            descricao: test.description(),
            resultado: test.result().label(),
            observacao: test.observation(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TestUpdatePayload<'a> {
    resultado: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    observacao: Option<&'a str>,
}

impl<'a> TestUpdatePayload<'a> {
    pub(crate) fn from_update(update: &'a TestUpdate) -> Self {
        Self {
            resultado: update.result.label(),
            observacao: update.observation.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewTestPayload<'a> {
    grupo: &'a str,
    sub_grupo: &'a str,
    caso_de_uso: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    descricao: Option<&'a str>,
    resultado: String,
}

impl<'a> NewTestPayload<'a> {
    pub(crate) fn from_new(new: &'a NewTestCase) -> Self {
        Self {
            grupo: new.group_id.as_str(),
            sub_grupo: new.sub_group_id.as_str(),
            caso_de_uso: &new.use_case,
            descricao: new.description.as_deref(),
            resultado: TestResult::NotTested.to_string(),
        }
    }
}

// ─── Sessions ──────────────────────────────────────────────────────────────────

/// Body of `POST /session/start`.
///
/// Unselected group/subgroup go out as empty strings; `tecnico` is omitted
/// when there is no signed-in technician.
#[derive(Debug, Serialize)]
pub(crate) struct NewSessionPayload<'a> {
    #[serde(rename = "grupoID")]
    group_id: &'a str,
    #[serde(rename = "subGrupoID")]
    sub_group_id: &'a str,
    #[serde(rename = "tecnico", skip_serializing_if = "Option::is_none")]
    technician: Option<&'a str>,
    #[serde(rename = "testes")]
    tests: Vec<TestPayload<'a>>,
}

impl<'a> NewSessionPayload<'a> {
    pub(crate) fn from_session(session: &'a NewSession) -> Self {
        Self {
            group_id: session.group_id.as_ref().map_or("", GroupId::as_str),
            sub_group_id: session.sub_group_id.as_ref().map_or("", SubGroupId::as_str),
            technician: session.technician.as_ref().map(UserId::as_str),
            tests: session.tests.iter().map(TestPayload::from_test).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "grupoID", alias = "grupo", default)]
    group: Option<RefField>,
    #[serde(rename = "subGrupoID", alias = "subGrupo", default)]
    sub_group: Option<RefField>,
    #[serde(rename = "tecnico", default)]
    technician: Option<RefField>,
    #[serde(rename = "testes", default)]
    tests: Vec<RefField>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub(crate) fn into_session(self) -> Result<Session, StorageError> {
        let ref_id = |field: &Option<RefField>| {
            field
                .as_ref()
                .and_then(RefField::id)
                .map(str::to_owned)
        };
        Ok(Session {
            id: SessionId::new(require_id("session _id", &self.id)?),
            group_id: ref_id(&self.group).map(GroupId::new),
            sub_group_id: ref_id(&self.sub_group).map(SubGroupId::new),
            technician: ref_id(&self.technician).map(UserId::new),
            test_ids: self
                .tests
                .iter()
                .filter_map(RefField::id)
                .map(TestId::new)
                .collect(),
            created_at: self.created_at,
        })
    }
}

/// Extract a session from a `start` response.
///
/// The service either returns the session document itself or wraps it under
/// `session`; anything else yields `None`.
pub(crate) fn session_from_start_response(
    body: serde_json::Value,
) -> Result<Option<Session>, StorageError> {
    let candidate = match body {
        serde_json::Value::Object(mut map) => match map.remove("session") {
            Some(inner @ serde_json::Value::Object(_)) => inner,
            Some(_) | None => serde_json::Value::Object(map),
        },
        _ => return Ok(None),
    };
    match serde_json::from_value::<SessionRecord>(candidate) {
        Ok(record) => record.into_session().map(Some),
        Err(_) => Ok(None),
    }
}
