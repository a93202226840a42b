//! Access checks for content operations.

use crate::actor::Actor;
use crate::models::ContentItem;

/// Permission required to view published content.
pub const ACCESS_CONTENT: &str = "access content";

/// Permission required to create content through the node resource.
pub const CREATE_CONTENT: &str = "create content";

/// Permission to view one's own unpublished content.
pub const VIEW_OWN_UNPUBLISHED: &str = "view own unpublished content";

/// Permission-check collaborator consumed by content resources.
pub trait Authorizer: Send + Sync {
    fn can_view(&self, actor: &Actor, item: &ContentItem) -> bool;
    fn can_create(&self, actor: &Actor) -> bool;
    fn can_update(&self, actor: &Actor, item: &ContentItem) -> bool;
    fn can_delete(&self, actor: &Actor, item: &ContentItem) -> bool;
}

/// Authorizer backed by the actor's permission strings.
///
/// - `administer site` passes every check.
/// - Published items need `access content`; unpublished ones need
///   authorship plus `view own unpublished content`.
/// - Update and delete accept `{op} any {bundle} content`, or
///   `{op} own {bundle} content` for the author.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionAuthorizer;

impl PermissionAuthorizer {
    fn check_operation(&self, actor: &Actor, item: &ContentItem, operation: &str) -> bool {
        if actor.is_admin() {
            return true;
        }

        let any = format!("{operation} any {} content", item.bundle);
        if actor.has_permission(&any) {
            return true;
        }

        let own = format!("{operation} own {} content", item.bundle);
        actor.authenticated && item.is_authored_by(actor.id) && actor.has_permission(&own)
    }
}

impl Authorizer for PermissionAuthorizer {
    fn can_view(&self, actor: &Actor, item: &ContentItem) -> bool {
        if actor.is_admin() {
            return true;
        }
        if item.is_published() {
            return actor.has_permission(ACCESS_CONTENT);
        }
        actor.authenticated
            && item.is_authored_by(actor.id)
            && actor.has_permission(VIEW_OWN_UNPUBLISHED)
    }

    fn can_create(&self, actor: &Actor) -> bool {
        actor.is_admin() || actor.has_permission(CREATE_CONTENT)
    }

    fn can_update(&self, actor: &Actor, item: &ContentItem) -> bool {
        self.check_operation(actor, item, "edit")
    }

    fn can_delete(&self, actor: &Actor, item: &ContentItem) -> bool {
        self.check_operation(actor, item, "delete")
    }
}
