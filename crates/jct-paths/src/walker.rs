//! Listing file objects below a package.

use crate::codec;
use crate::file_object::PathFileObject;
use crate::roots::RootSet;
use jct_core::traits::EntryType;
use jct_core::{Kind, Location, Result, WalkConfig};

/// What to list below a package directory.
#[derive(Debug, Clone, Copy)]
pub struct ListRequest<'a> {
    /// Dotted package name; empty for the root package.
    pub package_name: &'a str,
    /// Acceptable kinds. A file is kept if its name ends with any of the
    /// kinds' extensions.
    pub kinds: &'a [Kind],
    /// Include subpackages.
    pub recurse: bool,
}

/// Lists regular files below `request.package_name` in every root.
///
/// Roots are visited in insertion order; a root without the package
/// directory contributes nothing. Within a root, files come in depth-first
/// order, sorted by file name in each directory. The given name of each
/// file object is its path.
///
/// # Errors
///
/// Returns [`jct_core::Error::InvalidArgument`] for a malformed package name
/// or [`jct_core::Error::Io`] if an existing package directory cannot be
/// walked.
pub fn list(
    location: &Location,
    roots: &RootSet,
    request: &ListRequest<'_>,
    config: &WalkConfig,
) -> Result<Vec<PathFileObject>> {
    let relative = codec::package_to_relative(request.package_name)?;
    let max_depth = if request.recurse { None } else { Some(1) };
    let mut results = Vec::new();

    for root in roots {
        let dir = root.join(&relative);
        if !dir.is_dir() {
            continue;
        }

        let before = results.len();
        results.extend(
            dir.walk(max_depth, config)?
                .into_iter()
                .filter(|entry| entry.entry_type == EntryType::File)
                .filter(|entry| {
                    entry
                        .path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| request.kinds.iter().any(|kind| kind.matches(name)))
                })
                .map(|entry| {
                    let path = dir.rebind(&entry.path);
                    let given_name = path.to_string();
                    PathFileObject::new(location.clone(), path, given_name)
                }),
        );

        tracing::trace!(
            root = %root.uri(),
            package = request.package_name,
            found = results.len() - before,
            "listed package"
        );
    }

    Ok(results)
}
