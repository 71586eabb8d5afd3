//! Third-party SDK surfaces the pages expect, and their stub implementations.
//!
//! The stubs return fixed values so page code can run when the real SDK is missing.

use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    #[error("{0} is unavailable")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

/// Authentication (Firebase auth surface).
pub trait AuthProvider: Send + Sync {
    fn sign_in_anonymously(&self) -> Result<User, SdkError>;
    /// Calls `callback` with the current user (None when signed out).
    fn on_auth_state_changed(&self, callback: &mut dyn FnMut(Option<&User>));
}

/// Document store (Firestore surface). Documents are opaque strings.
pub trait DocumentStore: Send + Sync {
    /// Add a document; returns its id.
    fn add(&self, collection: &str, data: &str) -> Result<String, SdkError>;
    fn get(&self, collection: &str) -> Result<Vec<String>, SdkError>;
}

/// One editor instance (Monaco surface).
pub trait CodeEditor: Send {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    /// Register a listener called with the new content after each change.
    fn on_change(&mut self, listener: Box<dyn FnMut(&str) + Send>);
}

/// Creates editors.
pub trait EditorHost: Send + Sync {
    fn create(&self) -> Box<dyn CodeEditor>;
}

/// Google API loader surface (`gapi.load`, `auth2`).
pub trait ApiLoader: Send + Sync {
    /// Load `api`, then invoke `callback` if given.
    fn load(&self, api: &str, callback: Option<&mut dyn FnMut()>);
    fn sign_in(&self) -> Result<Profile, SdkError>;
}

pub const STUB_USER_ID: &str = "mock-user-id";
pub const STUB_DOC_ID: &str = "mock-doc-id";
pub const STUB_PROFILE_NAME: &str = "Mock User";
pub const STUB_PROFILE_EMAIL: &str = "mock@example.com";
pub const STUB_EDITOR_PLACEHOLDER: &str = "Code Editor (Mock) - Type your code here...";

#[derive(Debug, Default)]
pub struct StubAuth;

impl AuthProvider for StubAuth {
    fn sign_in_anonymously(&self) -> Result<User, SdkError> {
        Ok(User {
            uid: STUB_USER_ID.to_string(),
        })
    }

    fn on_auth_state_changed(&self, callback: &mut dyn FnMut(Option<&User>)) {
        let user = User {
            uid: STUB_USER_ID.to_string(),
        };
        callback(Some(&user));
    }
}

/// Accepts writes, stores nothing.
#[derive(Debug, Default)]
pub struct StubStore;

impl DocumentStore for StubStore {
    fn add(&self, collection: &str, _data: &str) -> Result<String, SdkError> {
        tracing::debug!(collection, "stub store add");
        Ok(STUB_DOC_ID.to_string())
    }

    fn get(&self, _collection: &str) -> Result<Vec<String>, SdkError> {
        Ok(Vec::new())
    }
}

/// Plain text buffer standing in for a code editor.
#[derive(Default)]
pub struct TextBufferEditor {
    text: String,
    listeners: Vec<Box<dyn FnMut(&str) + Send>>,
}

impl TextBufferEditor {
    pub fn placeholder(&self) -> &'static str {
        STUB_EDITOR_PLACEHOLDER
    }
}

impl CodeEditor for TextBufferEditor {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.text = value.to_string();
        for listener in &mut self.listeners {
            listener(&self.text);
        }
    }

    fn on_change(&mut self, listener: Box<dyn FnMut(&str) + Send>) {
        self.listeners.push(listener);
    }
}

#[derive(Debug, Default)]
pub struct StubEditorHost;

impl EditorHost for StubEditorHost {
    fn create(&self) -> Box<dyn CodeEditor> {
        tracing::debug!("stub editor created");
        Box::new(TextBufferEditor::default())
    }
}

/// Records which APIs were requested; always "loads" immediately. `sign_in` needs
/// `auth2` (alone or in a `client:auth2` list) to have been loaded first.
#[derive(Debug, Default)]
pub struct StubApiLoader {
    loaded: Mutex<Vec<String>>,
}

impl StubApiLoader {
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ApiLoader for StubApiLoader {
    fn load(&self, api: &str, callback: Option<&mut dyn FnMut()>) {
        tracing::debug!(api, "stub api loaded");
        if let Ok(mut loaded) = self.loaded.lock() {
            loaded.push(api.to_string());
        }
        if let Some(cb) = callback {
            cb();
        }
    }

    fn sign_in(&self) -> Result<Profile, SdkError> {
        let auth2_loaded = self
            .loaded()
            .iter()
            .any(|api| api.split(':').any(|part| part == "auth2"));
        if !auth2_loaded {
            return Err(SdkError::Unavailable("auth2".to_string()));
        }
        Ok(Profile {
            name: STUB_PROFILE_NAME.to_string(),
            email: STUB_PROFILE_EMAIL.to_string(),
        })
    }
}
