//! Scripted `DirectoryApi` for unit tests

use std::io;
use std::sync::Mutex;

use super::{ApiError, ContactForm, DirectoryApi, LoginReply, Result, SimilarAgents, User, WishlistReply};
use crate::catalog::{Agent, FilterOptionSet};

type Reply<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

/// A transport failure like a refused connection
pub fn network_error() -> ApiError {
    ApiError::Transport(ureq::Error::Io(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "connection refused",
    )))
}

pub fn agent(id: &str, category: &str, access_model: &str, saved_by_count: u64) -> Agent {
    Agent {
        id: id.to_string(),
        name: format!("Agent {}", id),
        category: category.to_string(),
        access_model: access_model.to_string(),
        saved_by_count,
        ..Default::default()
    }
}

pub struct FakeApi {
    agents: Reply<Vec<Agent>>,
    options: Reply<FilterOptionSet>,
    wishlist: Reply<WishlistReply>,
    login: Reply<LoginReply>,
    current_user: Reply<User>,
    logout: Reply<()>,
    message: Reply<Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            agents: Box::new(|| Ok(Vec::new())),
            options: Box::new(|| Ok(FilterOptionSet::default())),
            wishlist: Box::new(|| {
                Ok(WishlistReply {
                    status: 200,
                    saved_by_count: 1,
                })
            }),
            login: Box::new(|| Err(ApiError::Unauthenticated)),
            current_user: Box::new(|| Err(ApiError::Unauthenticated)),
            logout: Box::new(|| Ok(())),
            message: Box::new(|| Ok(None)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = Box::new(move || Ok(agents.clone()));
        self
    }

    pub fn failing_agents(mut self) -> Self {
        self.agents = Box::new(|| Err(network_error()));
        self
    }

    pub fn panicking_agents(mut self) -> Self {
        self.agents = Box::new(|| panic!("agents fetch panicked"));
        self
    }

    pub fn with_options(mut self, options: FilterOptionSet) -> Self {
        self.options = Box::new(move || Ok(options.clone()));
        self
    }

    pub fn failing_options(mut self) -> Self {
        self.options = Box::new(|| {
            Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        });
        self
    }

    pub fn with_wishlist(mut self, status: u16, saved_by_count: u64) -> Self {
        self.wishlist = Box::new(move || Ok(WishlistReply { status, saved_by_count }));
        self
    }

    pub fn failing_wishlist(mut self) -> Self {
        self.wishlist = Box::new(|| Err(network_error()));
        self
    }

    pub fn with_user(mut self, user: User, token: &str) -> Self {
        let login_user = user.clone();
        let token = token.to_string();
        self.login = Box::new(move || {
            Ok(LoginReply {
                user: login_user.clone(),
                token: Some(token.clone()),
            })
        });
        self.current_user = Box::new(move || Ok(user.clone()));
        self
    }

    pub fn failing_logout(mut self) -> Self {
        self.logout = Box::new(|| Err(network_error()));
        self
    }

    /// Names of the endpoints called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl DirectoryApi for FakeApi {
    fn fetch_agents(&self) -> Result<Vec<Agent>> {
        self.record("agents".to_string());
        (self.agents)()
    }

    fn fetch_filter_options(&self) -> Result<FilterOptionSet> {
        self.record("filters".to_string());
        (self.options)()
    }

    fn fetch_similar(&self, agent_id: &str) -> Result<SimilarAgents> {
        self.record(format!("similar:{}", agent_id));
        let agents = (self.agents)()?;
        let agent = agents
            .iter()
            .find(|a| a.id == agent_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Agent not found".to_string(),
            })?;
        let best_matches = agents
            .into_iter()
            .filter(|a| a.id != agent_id && a.category == agent.category)
            .collect();
        Ok(SimilarAgents { agent, best_matches })
    }

    fn toggle_wishlist(&self, agent_id: &str, token: &str) -> Result<WishlistReply> {
        self.record(format!("wishlist:{}:{}", agent_id, token));
        (self.wishlist)()
    }

    fn login(&self, email: &str, _password: &str) -> Result<LoginReply> {
        self.record(format!("login:{}", email));
        (self.login)()
    }

    fn current_user(&self, token: &str) -> Result<User> {
        self.record(format!("current_user:{}", token));
        (self.current_user)()
    }

    fn logout(&self, token: &str) -> Result<()> {
        self.record(format!("logout:{}", token));
        (self.logout)()
    }

    fn submit_contact(&self, form: &ContactForm) -> Result<Option<String>> {
        self.record(format!("contact:{}", form.email));
        (self.message)()
    }

    fn subscribe_newsletter(&self, email: &str) -> Result<Option<String>> {
        self.record(format!("newsletter:{}", email));
        (self.message)()
    }
}
