//! Dependency injection with mocked collaborators
//!
//! `UserAction::sign_up` depends on a flat repository and on a deeply nested
//! auth service. The tests inject a shallow mock for the first and a deep mock
//! for the second through thin adapters, the way a real test suite would wire
//! mocks into code that only knows its traits.
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test --test dependency_injection
//! RUST_LOG=mocktree=trace cargo test --test dependency_injection -- --nocapture
//! ```

use mocktree::{deep_mock, shallow_mock, DeepMock, ShallowMock, StubError, Value};
use serde::{Deserialize, Serialize};

// ============================================================================
// Test Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    id: Option<String>,
    name: String,
    email: String,
}

impl User {
    fn new(name: &str, email: &str) -> Self {
        User {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    fn to_value(&self) -> Value {
        Value::from_serialize(self).expect("user serializes")
    }
}

fn from_value(value: Value) -> Result<User, StubError> {
    value
        .deserialize_into()
        .map_err(|e| StubError::new(e.to_string()))
}

trait UserRepository {
    fn save(&self, user: &User) -> Result<User, StubError>;
}

trait AuthService {
    async fn sign_up(&self, user: &User) -> Result<User, StubError>;
}

/// Marker for the nested shape `{ auth: { service: { sign_up(user) } } }`
trait ComplexNested {}

struct MockedRepository(ShallowMock<dyn UserRepository>);

impl UserRepository for MockedRepository {
    fn save(&self, user: &User) -> Result<User, StubError> {
        let saved = self.0.field("save").call(vec![user.to_value()])?;
        from_value(saved)
    }
}

struct MockedComplexNested(DeepMock<dyn ComplexNested>);

impl AuthService for MockedComplexNested {
    async fn sign_up(&self, user: &User) -> Result<User, StubError> {
        let sign_up = self.0.field("auth").field("service").field("sign_up");
        let registered = sign_up.call_async(vec![user.to_value()]).await?;
        from_value(registered)
    }
}

struct UserAction<R, A> {
    repository: R,
    auth: A,
}

impl<R: UserRepository, A: AuthService> UserAction<R, A> {
    async fn sign_up(&self, name: &str, email: &str) -> Result<User, StubError> {
        let saved = self.repository.save(&User::new(name, email))?;
        self.auth.sign_up(&saved).await?;
        Ok(saved)
    }
}

struct Fixture {
    repository: ShallowMock<dyn UserRepository>,
    complex: DeepMock<dyn ComplexNested>,
    action: UserAction<MockedRepository, MockedComplexNested>,
}

fn fixture() -> Fixture {
    init_tracing();
    let repository = shallow_mock::<dyn UserRepository>();
    let complex = deep_mock::<dyn ComplexNested>();
    let action = UserAction {
        repository: MockedRepository(repository.clone()),
        auth: MockedComplexNested(complex.clone()),
    };
    Fixture {
        repository,
        complex,
        action,
    }
}

// ============================================================================
// UserAction::sign_up
// ============================================================================

mod sign_up {
    use super::*;

    #[tokio::test]
    async fn saves_the_user() {
        let f = fixture();
        let new_user = User::new("John Doe", "john.doe@example.com").with_id("1");
        f.repository.field("save").return_value(new_user.to_value());
        f.complex.at("auth.service.sign_up").resolved_value(new_user.to_value());

        let result = f
            .action
            .sign_up("John Doe", "john.doe@example.com")
            .await
            .unwrap();

        let expected_arg = User::new("John Doe", "john.doe@example.com").to_value();
        assert!(f.repository.field("save").was_called_with(&[expected_arg]));
        assert_eq!(result, new_user);
    }

    #[tokio::test]
    async fn signs_up_after_saving() {
        let f = fixture();
        let new_user = User::new("John Doe 2", "john.doe2@example.com").with_id("2");
        f.repository.field("save").return_value(new_user.to_value());
        f.complex.at("auth.service.sign_up").resolved_value(new_user.to_value());

        let result = f
            .action
            .sign_up("John Doe 2", "john.doe2@example.com")
            .await
            .unwrap();

        let sign_up = f.complex.at("auth.service.sign_up");
        assert!(sign_up.spy().was_called_with(&[new_user.to_value()]));
        assert_eq!(result, new_user);
    }

    #[tokio::test]
    async fn fails_when_save_fails() {
        let f = fixture();
        f.repository.field("save").rejected_value("User not found");

        let err = f
            .action
            .sign_up("John Doe 4", "john.doe4@example.com")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User not found");
        assert!(!f.complex.at("auth.service.sign_up").was_called());
    }

    #[tokio::test]
    async fn fails_when_auth_sign_up_rejects() {
        let f = fixture();
        let new_user = User::new("John Doe 5", "john.doe5@example.com").with_id("2");
        f.repository.field("save").return_value(new_user.to_value());
        f.complex
            .at("auth.service.sign_up")
            .rejected_value("Sign up failed");

        let err = f
            .action
            .sign_up("John Doe 5", "john.doe5@example.com")
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Sign up failed");
        assert_eq!(f.repository.field("save").times_called(), 1);
    }

    #[tokio::test]
    async fn clear_all_between_cases() {
        let f = fixture();
        let new_user = User::new("A", "a@example.com").with_id("1");
        f.repository.field("save").return_value(new_user.to_value());
        f.complex.at("auth.service.sign_up").resolved_value(new_user.to_value());
        f.action.sign_up("A", "a@example.com").await.unwrap();

        f.repository.clear_all();
        f.complex.clear_all();

        assert_eq!(f.repository.field("save").times_called(), 0);
        assert_eq!(f.complex.at("auth.service.sign_up").times_called(), 0);
        // Behaviors survive a clear
        assert_eq!(f.action.sign_up("A", "a@example.com").await.unwrap(), new_user);
    }
}

// ============================================================================
// Nested resolve scenario
// ============================================================================

#[tokio::test]
async fn resolves_literal_user_through_nested_path() {
    init_tracing();
    let mock = deep_mock::<dyn ComplexNested>();
    let literal = Value::from(serde_json::json!({ "id": "1", "name": "A" }));
    let input_user = User::new("A", "a@example.com").to_value();

    mock.field("auth")
        .field("service")
        .field("sign_up")
        .resolved_value(literal.clone());

    let result = mock
        .field("auth")
        .field("service")
        .field("sign_up")
        .call_async(vec![input_user.clone()])
        .await
        .unwrap();

    assert_eq!(result, literal);
    let spy = mock.field("auth").field("service").field("sign_up");
    let calls = spy.spy().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec![input_user]);
}
