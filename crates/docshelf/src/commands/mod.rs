//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod route;
pub(crate) mod search;

pub(crate) use check::CheckArgs;
pub(crate) use route::RouteArgs;
pub(crate) use search::SearchArgs;
