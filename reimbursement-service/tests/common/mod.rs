use std::sync::Arc;

use auth::PasswordHasher;
use auth::StaticKeyProvider;
use chrono::Duration;
use chrono::Utc;
use reimbursement_service::access::service::AccessService;
use reimbursement_service::identity::tokens::TokenService;
use reimbursement_service::inbound::http::middleware::CURRENT_USER_HEADER;
use reimbursement_service::inbound::http::router::create_router;
use reimbursement_service::repositories::InMemoryTicketRepository;
use reimbursement_service::repositories::InMemoryUserRepository;
use reimbursement_service::ticket::service::TicketService;
use reimbursement_service::user::models::Role;
use reimbursement_service::user::models::User;
use reimbursement_service::user::models::UserId;
use reimbursement_service::user::models::Username;
use reimbursement_service::user::ports::UserRepository;
use reimbursement_service::user::service::UserService;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub users: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
}

/// A logged-in caller
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_token_lifetime(Duration::minutes(TokenService::DEFAULT_LIFETIME_MINUTES))
            .await
    }

    pub async fn spawn_with_token_lifetime(lifetime: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::new());
        let tickets = Arc::new(InMemoryTicketRepository::new());

        let token_service = Arc::new(TokenService::new(
            &StaticKeyProvider::new(TEST_SECRET),
            lifetime,
        ));

        let router = create_router(
            Arc::new(UserService::new(Arc::clone(&users))),
            Arc::new(TicketService::new(tickets)),
            Arc::new(AccessService::new(Arc::clone(&users))),
            token_service,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            users,
            api_client: reqwest::Client::new(),
        }
    }

    /// Insert an account directly, bypassing registration (which always
    /// creates employees)
    pub async fn seed_user(&self, username: &str, password: &str, role: Role) -> User {
        let user = User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            role,
            created_at: Utc::now(),
        };

        self.users.create(user).await.expect("Failed to seed user")
    }

    /// Register through the API and log in
    pub async fn employee(&self, username: &str) -> Session {
        let response = self
            .post("/register")
            .json(&json!({ "username": username, "password": "pass_word!" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        self.login(username, "pass_word!").await
    }

    pub async fn manager(&self, username: &str) -> Session {
        self.seed_user(username, "pass_word!", Role::Manager).await;
        self.login(username, "pass_word!").await
    }

    pub async fn login(&self, username: &str, password: &str) -> Session {
        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let token = body["token"].as_str().unwrap().to_string();

        let user = self
            .users
            .find_by_username(&Username::new(username.to_string()).unwrap())
            .await
            .unwrap()
            .expect("Logged-in user missing from store");

        Session {
            user_id: user.id.to_string(),
            token,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Attach the bearer token and the matching `current-user` header
    pub fn as_user(
        &self,
        request: reqwest::RequestBuilder,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&session.token)
            .header(CURRENT_USER_HEADER, &session.user_id)
    }

    /// Submit a ticket and return its JSON
    pub async fn submit_ticket(&self, session: &Session, amount: f64) -> serde_json::Value {
        let response = self
            .as_user(self.post("/tickets"), session)
            .json(&json!({ "amount": amount, "description": "client dinner", "type": "Food" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }
}
