//! Navigation path contract.
//!
//! Entity pages share one path family: the bare base path shows the
//! list, and `{base}/crear`, `{base}/{id}/ver`, `{base}/{id}/editar`,
//! `{base}/{id}/eliminar` open the matching dialog over the same list.

use core::fmt::Display;
use core::str::FromStr;

/// A parsed CRUD navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudRoute<Id> {
    List,
    Create,
    View(Id),
    Edit(Id),
    Delete(Id),
}

/// Parse a navigation path against an entity's base path.
///
/// Anything that is not one of the recognized shapes (a foreign prefix,
/// extra segments, a non-numeric id) resolves to `List`: malformed URLs
/// land on the list instead of erroring.
pub fn parse_route<Id: FromStr>(base: &str, path: &str) -> CrudRoute<Id> {
    let base_segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if !segments.starts_with(&base_segments) {
        return CrudRoute::List;
    }

    match &segments[base_segments.len()..] {
        [] => CrudRoute::List,
        ["crear"] => CrudRoute::Create,
        [id, "ver"] => id.parse().map(CrudRoute::View).unwrap_or(CrudRoute::List),
        [id, "editar"] => id.parse().map(CrudRoute::Edit).unwrap_or(CrudRoute::List),
        [id, "eliminar"] => id.parse().map(CrudRoute::Delete).unwrap_or(CrudRoute::List),
        _ => CrudRoute::List,
    }
}

/// Render the path for a route (the inverse of [`parse_route`]).
pub fn route_path<Id: Display>(base: &str, route: &CrudRoute<Id>) -> String {
    let base = base.trim_end_matches('/');
    match route {
        CrudRoute::List => base.to_string(),
        CrudRoute::Create => format!("{base}/crear"),
        CrudRoute::View(id) => format!("{base}/{id}/ver"),
        CrudRoute::Edit(id) => format!("{base}/{id}/editar"),
        CrudRoute::Delete(id) => format!("{base}/{id}/eliminar"),
    }
}
