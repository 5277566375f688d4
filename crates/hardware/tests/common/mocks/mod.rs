//! Mock collaborators that record how the cache used them.


/// Scriptable vector cache.
pub mod vector;
