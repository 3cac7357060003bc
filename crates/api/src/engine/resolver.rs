//! Find the canonical tree an incoming payload refers to.
//!
//! Lookups run in order, server id then client uuid then tag, and a miss
//! falls through to the next key. Tag matches take the oldest row.

use arbor_core::payload::TreePayload;
use arbor_db::models::tree::Tree;
use arbor_db::repositories::TreeRepo;
use sqlx::PgConnection;

/// Which key located an existing tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    ServerId,
    Uuid,
    Tag,
}

impl MatchedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedBy::ServerId => "server_id",
            MatchedBy::Uuid => "uuid",
            MatchedBy::Tag => "tag",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Resolution {
    /// The payload has no client uuid and cannot be stored.
    Skip,
    /// Nothing matched; `uuid` becomes the new tree's permanent identity.
    New { uuid: String },
    Existing {
        tree: Box<Tree>,
        uuid: String,
        matched_by: MatchedBy,
    },
}

pub async fn resolve(
    conn: &mut PgConnection,
    payload: &TreePayload,
) -> Result<Resolution, sqlx::Error> {
    let Some(uuid) = payload.uuid() else {
        return Ok(Resolution::Skip);
    };
    let uuid = uuid.to_string();

    if let Some(id) = payload.server_id() {
        if let Some(tree) = TreeRepo::find_by_id(&mut *conn, id).await? {
            return Ok(existing(tree, uuid, MatchedBy::ServerId));
        }
        tracing::debug!(server_id = id, "Server id not found, trying uuid");
    }

    if let Some(tree) = TreeRepo::find_by_uuid(&mut *conn, &uuid).await? {
        return Ok(existing(tree, uuid, MatchedBy::Uuid));
    }

    if let Some(tag) = payload.tag() {
        if let Some(tree) = TreeRepo::find_oldest_by_tag(&mut *conn, &tag).await? {
            return Ok(existing(tree, uuid, MatchedBy::Tag));
        }
    }

    Ok(Resolution::New { uuid })
}

fn existing(tree: Tree, uuid: String, matched_by: MatchedBy) -> Resolution {
    Resolution::Existing {
        tree: Box::new(tree),
        uuid,
        matched_by,
    }
}
