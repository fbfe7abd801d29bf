//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

pub mod document_store;
mod identity;

pub use document_store::{
    collections, from_document, from_documents, to_document, Document, DocumentStore, Query,
    SortOrder,
};
pub use identity::IdentityProvider;
