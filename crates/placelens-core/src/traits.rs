use crate::types::{EntityKind, ResolvedEntity};
use futures::future::BoxFuture;

/// External lookup for person/architect entity references.
///
/// Implementations live outside this workspace (a knowledge-base
/// client, typically). Errors are opaque: callers treat any `Err` as
/// "no result" and must not surface it. Implementations must not
/// mutate state observed by this core.
pub trait EntityResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        entity_ref: &'a str,
        kind: EntityKind,
    ) -> BoxFuture<'a, anyhow::Result<ResolvedEntity>>;
}
