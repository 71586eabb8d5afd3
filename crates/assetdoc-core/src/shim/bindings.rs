//! SDK bindings handed to a page at initialization.
//!
//! Real implementations are passed in explicitly; only the slots left empty get a
//! stub. Nothing is installed globally, so a real SDK is never shadowed by a stub.

use std::sync::Arc;

use super::sdk::{
    ApiLoader, AuthProvider, DocumentStore, EditorHost, StubApiLoader, StubAuth,
    StubEditorHost, StubStore,
};

pub struct SdkBindings {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    editor: Arc<dyn EditorHost>,
    api: Arc<dyn ApiLoader>,
    stubbed: Vec<&'static str>,
}

impl SdkBindings {
    pub fn builder() -> SdkBindingsBuilder {
        SdkBindingsBuilder::default()
    }

    /// Stubs for every slot.
    pub fn stubbed() -> Self {
        Self::builder().build()
    }

    pub fn auth(&self) -> &Arc<dyn AuthProvider> {
        &self.auth
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn editor(&self) -> &Arc<dyn EditorHost> {
        &self.editor
    }

    pub fn api(&self) -> &Arc<dyn ApiLoader> {
        &self.api
    }

    /// Names of the slots that fell back to a stub ("auth", "store", "editor", "api").
    pub fn stubbed_slots(&self) -> &[&'static str] {
        &self.stubbed
    }

    pub fn is_stubbed(&self, slot: &str) -> bool {
        self.stubbed.iter().any(|s| *s == slot)
    }
}

#[derive(Default)]
pub struct SdkBindingsBuilder {
    auth: Option<Arc<dyn AuthProvider>>,
    store: Option<Arc<dyn DocumentStore>>,
    editor: Option<Arc<dyn EditorHost>>,
    api: Option<Arc<dyn ApiLoader>>,
}

impl SdkBindingsBuilder {
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn editor(mut self, editor: Arc<dyn EditorHost>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn api(mut self, api: Arc<dyn ApiLoader>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> SdkBindings {
        let mut stubbed = Vec::new();
        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(real) => real,
            None => {
                note_stub("auth", &mut stubbed);
                Arc::new(StubAuth)
            }
        };
        let store: Arc<dyn DocumentStore> = match self.store {
            Some(real) => real,
            None => {
                note_stub("store", &mut stubbed);
                Arc::new(StubStore)
            }
        };
        let editor: Arc<dyn EditorHost> = match self.editor {
            Some(real) => real,
            None => {
                note_stub("editor", &mut stubbed);
                Arc::new(StubEditorHost)
            }
        };
        let api: Arc<dyn ApiLoader> = match self.api {
            Some(real) => real,
            None => {
                note_stub("api", &mut stubbed);
                Arc::new(StubApiLoader::default())
            }
        };
        SdkBindings {
            auth,
            store,
            editor,
            api,
            stubbed,
        }
    }
}

fn note_stub(slot: &'static str, stubbed: &mut Vec<&'static str>) {
    tracing::info!("{} SDK unavailable, using stub", slot);
    stubbed.push(slot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shim::sdk::{SdkError, User};

    struct RealAuth;

    impl AuthProvider for RealAuth {
        fn sign_in_anonymously(&self) -> Result<User, SdkError> {
            Ok(User { uid: "real-uid".into() })
        }

        fn on_auth_state_changed(&self, callback: &mut dyn FnMut(Option<&User>)) {
            callback(None);
        }
    }

    #[test]
    fn empty_builder_stubs_everything() {
        let b = SdkBindings::stubbed();
        assert_eq!(b.stubbed_slots(), ["auth", "store", "editor", "api"]);
        assert_eq!(b.auth().sign_in_anonymously().unwrap().uid, "mock-user-id");
        assert_eq!(b.store().add("c", "d").unwrap(), "mock-doc-id");
    }

    #[test]
    fn supplied_implementation_is_not_shadowed() {
        let b = SdkBindings::builder().auth(Arc::new(RealAuth)).build();
        assert!(!b.is_stubbed("auth"));
        assert!(b.is_stubbed("store"));
        assert_eq!(b.auth().sign_in_anonymously().unwrap().uid, "real-uid");
    }
}
