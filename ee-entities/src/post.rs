use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::{id::Id, time::Timestamp};

pub type PostStatusPrimitive = i16;

/// Soft-delete state of forum content. `Deleted` is terminal;
/// deleted rows are retained for audit but hidden everywhere.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum PostStatus {
    Deleted = 0,
    Active  = 1,
}

#[derive(Debug, Error)]
#[error("Invalid post status primitive: {0}")]
pub struct InvalidPostStatusPrimitive(PostStatusPrimitive);

impl TryFrom<PostStatusPrimitive> for PostStatus {
    type Error = InvalidPostStatusPrimitive;
    fn try_from(from: PostStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidPostStatusPrimitive(from))
    }
}

impl From<PostStatus> for PostStatusPrimitive {
    fn from(from: PostStatus) -> Self {
        from.to_i16().expect("post status primitive")
    }
}

/// Forum sections a post can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum PostSection {
    General,
    FoodFinds,
    Recipes,
    AskTheCommunity,
    Events,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id         : Id,
    pub author_id  : Id,
    pub title      : String,
    pub body       : String,
    pub section    : PostSection,
    pub status     : PostStatus,
    pub created_at : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostComment {
    pub id         : Id,
    pub post_id    : Id,
    pub author_id  : Id,
    pub body       : String,
    pub status     : PostStatus,
    pub created_at : Timestamp,
}

/// A user's like of a post. At most one per (user, post) pair.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLike {
    pub user_id    : Id,
    pub post_id    : Id,
    pub created_at : Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_string_round_trip() {
        for section in [
            PostSection::General,
            PostSection::FoodFinds,
            PostSection::Recipes,
            PostSection::AskTheCommunity,
            PostSection::Events,
        ] {
            assert_eq!(
                section,
                section.to_string().parse::<PostSection>().unwrap()
            );
        }
        assert_eq!("food-finds", PostSection::FoodFinds.to_string());
        assert!("off-topic".parse::<PostSection>().is_err());
    }

    #[test]
    fn status_primitive_round_trip() {
        assert_eq!(PostStatus::Active, PostStatus::try_from(1).unwrap());
        assert_eq!(PostStatus::Deleted, PostStatus::try_from(0).unwrap());
        assert!(PostStatus::try_from(-1).is_err());
    }
}
