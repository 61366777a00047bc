//! Folder assignment semantics.
//!
//! A folder is an opaque free-text tag on a media item. A screen's
//! assigned folder is the only link between screens and media: equality
//! selects, the `all` sentinel (or no assignment) selects everything, and
//! a tag no media carries simply selects nothing.

/// Sentinel folder meaning "no filter -- show everything".
pub const FOLDER_ALL: &str = "all";

/// Default folder for uploads that don't specify one.
pub const FOLDER_DEFAULT: &str = "general";

/// Whether an assignment selects every media item.
///
/// No assignment, an empty string, and the `all` sentinel are all
/// unfiltered.
pub fn is_unfiltered(assigned: Option<&str>) -> bool {
    matches!(assigned, None | Some("") | Some(FOLDER_ALL))
}

/// Whether a media item's folder tag is selected by an assignment.
pub fn matches(item_folder: &str, assigned: Option<&str>) -> bool {
    match assigned {
        Some(folder) if !is_unfiltered(assigned) => item_folder == folder,
        _ => true,
    }
}
