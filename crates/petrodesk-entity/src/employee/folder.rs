//! The employee folder tree.
//!
//! Folders nest to arbitrary depth and each holds a flat list of document
//! references. Internally the tree is an arena keyed by folder id with
//! explicit parent back-references, so locating a folder is a map lookup
//! rather than a tree walk; the nested shape clients see (and the shape
//! persisted in the aggregate's JSONB column) is projected on demand via
//! [`FolderView`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use petrodesk_core::{AppError, AppResult};

use super::document::DocumentRef;

/// A single folder node in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique within the owning employee's entire tree.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder id; `None` iff this is a root folder.
    pub parent_id: Option<Uuid>,
    /// Child folder ids, in insertion order.
    pub children: Vec<Uuid>,
    /// Documents attached to this folder, in upload order.
    pub documents: Vec<DocumentRef>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Nested projection of a folder, as serialized and returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderView {
    /// Folder id.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder id (`None` for roots).
    pub parent_id: Option<Uuid>,
    /// Documents in this folder.
    pub documents: Vec<DocumentRef>,
    /// Child folders, recursively.
    pub subfolders: Vec<FolderView>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

/// An employee's complete folder tree.
///
/// Exclusively owned by one employee aggregate; ids are unique across the
/// whole tree, and the structure is acyclic by construction (folders are only
/// ever created under an existing parent and there is no move operation).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<FolderView>", into = "Vec<FolderView>")]
pub struct FolderTree {
    nodes: HashMap<Uuid, Folder>,
    roots: Vec<Uuid>,
}

impl FolderTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of folders in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no folders.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root folder ids, in insertion order.
    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    /// Look up a folder anywhere in the tree.
    pub fn get(&self, id: Uuid) -> Option<&Folder> {
        self.nodes.get(&id)
    }

    /// Whether a folder with this id exists anywhere in the tree.
    pub fn contains(&self, id: Uuid) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Create a new empty folder under `parent_id`, or at the root when
    /// `parent_id` is `None`. Returns the new folder's id.
    ///
    /// Fails with `Validation` on an empty name, `NotFound` when the parent
    /// does not exist, and `Conflict` when a sibling already carries the
    /// same name.
    pub fn insert(&mut self, name: &str, parent_id: Option<Uuid>) -> AppResult<Uuid> {
        let name = valid_name(name)?;

        let siblings = match parent_id {
            Some(pid) => {
                &self
                    .nodes
                    .get(&pid)
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?
                    .children
            }
            None => &self.roots,
        };
        self.check_sibling_name(siblings, &name, None)?;

        let id = Uuid::new_v4();
        let folder = Folder {
            id,
            name,
            parent_id,
            children: Vec::new(),
            documents: Vec::new(),
            created_at: Utc::now(),
        };
        self.nodes.insert(id, folder);

        match parent_id {
            Some(pid) => {
                // Parent existence was checked above.
                self.nodes
                    .get_mut(&pid)
                    .map(|p| p.children.push(id))
                    .ok_or_else(|| AppError::internal("Parent vanished during insert"))?;
            }
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Rename a folder in place.
    pub fn rename(&mut self, id: Uuid, new_name: &str) -> AppResult<()> {
        let new_name = valid_name(new_name)?;

        let parent_id = self
            .nodes
            .get(&id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?
            .parent_id;

        let siblings = match parent_id {
            Some(pid) => &self.nodes[&pid].children,
            None => &self.roots,
        };
        self.check_sibling_name(siblings, &new_name, Some(id))?;

        if let Some(folder) = self.nodes.get_mut(&id) {
            folder.name = new_name;
        }
        Ok(())
    }

    /// Remove a folder and its entire subtree from wherever it occurs.
    ///
    /// Idempotent: removing an absent id is a no-op. Returns the document
    /// references held by every removed folder so the caller can clean up
    /// the stored objects.
    pub fn remove_subtree(&mut self, id: Uuid) -> Vec<DocumentRef> {
        let Some(root) = self.nodes.get(&id) else {
            return Vec::new();
        };

        // Detach from the parent's child list (or the root list).
        match root.parent_id {
            Some(pid) => {
                if let Some(parent) = self.nodes.get_mut(&pid) {
                    parent.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        // Depth-first removal of the subtree, collecting documents.
        let mut removed_docs = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(folder) = self.nodes.remove(&current) {
                stack.extend(folder.children);
                removed_docs.extend(folder.documents);
            }
        }
        removed_docs
    }

    /// Append a document reference to a folder.
    pub fn attach_document(&mut self, folder_id: Uuid, doc: DocumentRef) -> AppResult<()> {
        self.nodes
            .get_mut(&folder_id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?
            .documents
            .push(doc);
        Ok(())
    }

    /// Remove every document whose URL matches `url` exactly.
    /// Returns the number of references removed.
    pub fn detach_documents_by_url(&mut self, folder_id: Uuid, url: &str) -> AppResult<usize> {
        let folder = self
            .nodes
            .get_mut(&folder_id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        let before = folder.documents.len();
        folder.documents.retain(|d| d.url != url);
        Ok(before - folder.documents.len())
    }

    /// All document references in the tree, in depth-first order.
    pub fn all_documents(&self) -> Vec<&DocumentRef> {
        let mut docs = Vec::new();
        let mut stack: Vec<Uuid> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(folder) = self.nodes.get(&id) {
                docs.extend(folder.documents.iter());
                stack.extend(folder.children.iter().rev().copied());
            }
        }
        docs
    }

    /// Project the nested view of the whole tree.
    pub fn to_views(&self) -> Vec<FolderView> {
        self.roots
            .iter()
            .filter_map(|id| self.view_of(*id))
            .collect()
    }

    /// Nested projection of one folder and its descendants.
    pub fn view_of(&self, id: Uuid) -> Option<FolderView> {
        let folder = self.nodes.get(&id)?;
        Some(FolderView {
            id: folder.id,
            name: folder.name.clone(),
            parent_id: folder.parent_id,
            documents: folder.documents.clone(),
            subfolders: folder
                .children
                .iter()
                .filter_map(|c| self.view_of(*c))
                .collect(),
            created_at: folder.created_at,
        })
    }

    fn check_sibling_name(
        &self,
        siblings: &[Uuid],
        name: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<()> {
        let clash = siblings
            .iter()
            .filter(|id| Some(**id) != exclude)
            .filter_map(|id| self.nodes.get(id))
            .any(|f| f.name == name);
        if clash {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists at this level"
            )));
        }
        Ok(())
    }
}

fn valid_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

impl From<FolderTree> for Vec<FolderView> {
    fn from(tree: FolderTree) -> Self {
        tree.to_views()
    }
}

impl TryFrom<Vec<FolderView>> for FolderTree {
    type Error = String;

    /// Rebuild the arena from the persisted nested form.
    ///
    /// The nesting is authoritative for parent links; duplicate ids anywhere
    /// in the structure are rejected.
    fn try_from(views: Vec<FolderView>) -> Result<Self, Self::Error> {
        let mut tree = FolderTree::new();

        fn walk(
            tree: &mut FolderTree,
            view: FolderView,
            parent_id: Option<Uuid>,
        ) -> Result<(), String> {
            if tree.nodes.contains_key(&view.id) {
                return Err(format!("duplicate folder id {} in tree", view.id));
            }
            let folder = Folder {
                id: view.id,
                name: view.name,
                parent_id,
                children: view.subfolders.iter().map(|c| c.id).collect(),
                documents: view.documents,
                created_at: view.created_at,
            };
            let id = folder.id;
            tree.nodes.insert(id, folder);
            for child in view.subfolders {
                walk(tree, child, Some(id))?;
            }
            Ok(())
        }

        for view in views {
            let id = view.id;
            walk(&mut tree, view, None)?;
            tree.roots.push(id);
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petrodesk_core::error::ErrorKind;

    fn doc(url: &str) -> DocumentRef {
        DocumentRef {
            url: url.to_string(),
            mime_type: "application/pdf".to_string(),
            name: "report.pdf".to_string(),
            storage_key: format!("key-{url}"),
            uploaded_by: Uuid::new_v4(),
            uploaded_at: Utc::now(),
            size_bytes: 42,
            format: "pdf".to_string(),
            resource_type: "raw".to_string(),
            width: None,
            height: None,
        }
    }

    /// Builds root -> a -> b -> c and returns (tree, [root, a, b, c]).
    fn deep_tree() -> (FolderTree, Vec<Uuid>) {
        let mut tree = FolderTree::new();
        let root = tree.insert("root", None).unwrap();
        let a = tree.insert("a", Some(root)).unwrap();
        let b = tree.insert("b", Some(a)).unwrap();
        let c = tree.insert("c", Some(b)).unwrap();
        (tree, vec![root, a, b, c])
    }

    #[test]
    fn test_locate_at_any_depth() {
        let (tree, ids) = deep_tree();
        for (i, id) in ids.iter().enumerate() {
            let folder = tree.get(*id).expect("folder should be found");
            assert_eq!(folder.id, *id, "folder {i} resolved to the wrong node");
        }
        assert!(tree.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_insert_under_parent_not_in_roots() {
        let mut tree = FolderTree::new();
        let root = tree.insert("contracts", None).unwrap();
        let child = tree.insert("2024", Some(root)).unwrap();

        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.get(root).unwrap().children, vec![child]);
        assert_eq!(tree.get(child).unwrap().parent_id, Some(root));
    }

    #[test]
    fn test_insert_missing_parent() {
        let mut tree = FolderTree::new();
        let err = tree.insert("orphan", Some(Uuid::new_v4())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_insert_rejects_empty_name() {
        let mut tree = FolderTree::new();
        let err = tree.insert("   ", None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_sibling_name_conflict() {
        let mut tree = FolderTree::new();
        let root = tree.insert("docs", None).unwrap();
        tree.insert("hse", Some(root)).unwrap();
        let err = tree.insert("hse", Some(root)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Same name is fine at a different level.
        tree.insert("hse", None).unwrap();
    }

    #[test]
    fn test_rename() {
        let mut tree = FolderTree::new();
        let id = tree.insert("old", None).unwrap();
        tree.rename(id, "new").unwrap();
        assert_eq!(tree.get(id).unwrap().name, "new");

        // Renaming to its own current name is allowed.
        tree.rename(id, "new").unwrap();

        let err = tree.rename(Uuid::new_v4(), "x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_rename_sibling_conflict() {
        let mut tree = FolderTree::new();
        tree.insert("a", None).unwrap();
        let b = tree.insert("b", None).unwrap();
        let err = tree.rename(b, "a").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_remove_subtree_complete() {
        let (mut tree, ids) = deep_tree();
        let side = tree.insert("side", None).unwrap();
        tree.attach_document(ids[2], doc("http://cdn/x")).unwrap();
        tree.attach_document(ids[3], doc("http://cdn/y")).unwrap();

        let docs = tree.remove_subtree(ids[1]);
        assert_eq!(docs.len(), 2);

        for id in &ids[1..] {
            assert!(!tree.contains(*id), "descendant {id} survived the prune");
        }
        assert!(tree.contains(ids[0]));
        assert!(tree.contains(side));
        assert!(tree.get(ids[0]).unwrap().children.is_empty());
    }

    #[test]
    fn test_remove_root_folder() {
        let (mut tree, ids) = deep_tree();
        tree.remove_subtree(ids[0]);
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn test_remove_subtree_idempotent() {
        let (mut tree, ids) = deep_tree();
        tree.remove_subtree(ids[2]);
        let snapshot = serde_json::to_value(&tree).unwrap();

        let docs = tree.remove_subtree(ids[2]);
        assert!(docs.is_empty());
        assert_eq!(serde_json::to_value(&tree).unwrap(), snapshot);
    }

    #[test]
    fn test_detach_documents_by_exact_url() {
        let mut tree = FolderTree::new();
        let id = tree.insert("docs", None).unwrap();
        tree.attach_document(id, doc("http://cdn/a")).unwrap();
        tree.attach_document(id, doc("http://cdn/a")).unwrap();
        tree.attach_document(id, doc("http://cdn/ab")).unwrap();

        let removed = tree.detach_documents_by_url(id, "http://cdn/a").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(tree.get(id).unwrap().documents.len(), 1);
        assert_eq!(tree.get(id).unwrap().documents[0].url, "http://cdn/ab");
    }

    #[test]
    fn test_serde_round_trip_preserves_structure() {
        let (mut tree, ids) = deep_tree();
        tree.attach_document(ids[3], doc("http://cdn/deep")).unwrap();

        let json = serde_json::to_string(&tree).unwrap();
        let restored: FolderTree = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), tree.len());
        for id in &ids {
            assert!(restored.contains(*id));
        }
        assert_eq!(restored.get(ids[3]).unwrap().parent_id, Some(ids[2]));
        assert_eq!(restored.get(ids[3]).unwrap().documents.len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_ids() {
        let (tree, ids) = deep_tree();
        let mut views = tree.to_views();
        // Inject the root's id again as a child of itself.
        let dup = FolderView {
            id: ids[0],
            name: "evil".to_string(),
            parent_id: Some(ids[0]),
            documents: Vec::new(),
            subfolders: Vec::new(),
            created_at: Utc::now(),
        };
        views[0].subfolders.push(dup);

        let json = serde_json::to_string(&views).unwrap();
        assert!(serde_json::from_str::<FolderTree>(&json).is_err());
    }

    #[test]
    fn test_all_documents_walks_whole_tree() {
        let (mut tree, ids) = deep_tree();
        tree.attach_document(ids[0], doc("http://cdn/r")).unwrap();
        tree.attach_document(ids[3], doc("http://cdn/d")).unwrap();
        let urls: Vec<_> = tree.all_documents().iter().map(|d| d.url.clone()).collect();
        assert_eq!(urls, vec!["http://cdn/r", "http://cdn/d"]);
    }
}
