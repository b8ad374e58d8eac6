use async_trait::async_trait;
use reqwest::Method;
use testdesk_core::model::{NewSession, Session};

use super::HttpRepository;
use super::mapping::{NewSessionPayload, SessionRecord, session_from_start_response};
use crate::credentials::Credentials;
use crate::repository::{SessionRepository, StorageError};

#[async_trait]
impl SessionRepository for HttpRepository {
    async fn start_session(
        &self,
        auth: &Credentials,
        session: &NewSession,
    ) -> Result<Option<Session>, StorageError> {
        let builder = self
            .request(Method::POST, "session/start", auth)
            .json(&NewSessionPayload::from_session(session));
        let response = Self::send(builder).await?;
        // An empty or non-JSON body still means the session was accepted.
        let body = response
            .bytes()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(value) => session_from_start_response(value),
            Err(_) => Ok(None),
        }
    }

    async fn list_sessions(&self, auth: &Credentials) -> Result<Vec<Session>, StorageError> {
        let records: Vec<SessionRecord> = self.fetch("session", auth).await?;
        records
            .into_iter()
            .map(SessionRecord::into_session)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiConfig;
    use mockito::Matcher;
    use serde_json::json;
    use testdesk_core::model::{
        GroupId, SessionId, SubGroupId, TestCase, TestId, TestResult, UserId,
    };

    fn repo_for(server: &mockito::ServerGuard) -> HttpRepository {
        HttpRepository::new(ApiConfig::new(&server.url()).unwrap()).unwrap()
    }

    fn build_session() -> NewSession {
        let test = TestCase::new(
            TestId::new("t1"),
            GroupId::new("g1"),
            SubGroupId::new("s1"),
            "Login",
        )
        .with_result(TestResult::Passed);
        NewSession::new(
            Some(GroupId::new("g1")),
            Some(SubGroupId::new("s1")),
            Some(UserId::new("u1")),
            vec![test],
        )
    }

    #[tokio::test]
    async fn start_posts_session_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/session/start")
            .match_header("authorization", "Bearer abc")
            .match_body(Matcher::PartialJson(json!({
                "grupoID": "g1",
                "subGrupoID": "s1",
                "tecnico": "u1",
                "testes": [{"_id": "t1", "resultado": "Aprovado"}]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "_id": "x1",
                    "grupoID": "g1",
                    "subGrupoID": "s1",
                    "tecnico": "u1",
                    "testes": [{"_id": "t1"}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let started = repo_for(&server)
            .start_session(&Credentials::bearer("abc"), &build_session())
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(started.id, SessionId::new("x1"));
        assert_eq!(started.technician, Some(UserId::new("u1")));
    }

    #[tokio::test]
    async fn start_accepts_empty_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/session/start")
            .with_status(204)
            .create_async()
            .await;

        let started = repo_for(&server)
            .start_session(&Credentials::bearer("abc"), &build_session())
            .await
            .unwrap();
        assert_eq!(started, None);
    }

    #[tokio::test]
    async fn start_failure_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/session/start")
            .with_status(503)
            .create_async()
            .await;

        let result = repo_for(&server)
            .start_session(&Credentials::bearer("abc"), &build_session())
            .await;
        assert!(matches!(result, Err(StorageError::Status(503))));
    }

    #[tokio::test]
    async fn lists_sessions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/session")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"_id":"x1","grupoID":"g1","subGrupoID":"s1","tecnico":{"_id":"u1"},"testes":["t1","t2"],"createdAt":"2024-05-01T10:00:00Z"},
                    {"_id":"x2"}]"#,
            )
            .create_async()
            .await;

        let sessions = repo_for(&server)
            .list_sessions(&Credentials::bearer("abc"))
            .await
            .unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].test_ids.len(), 2);
        assert_eq!(sessions[0].technician, Some(UserId::new("u1")));
        assert!(sessions[0].created_at.is_some());
        assert_eq!(sessions[1].group_id, None);
    }
}
