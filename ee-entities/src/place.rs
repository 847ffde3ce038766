use crate::{activity::Activity, address::Address, geo::MapPoint, id::Id};

/// Dietary properties of a food source, used as search filters.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DietaryFlags {
    pub vegan       : bool,
    pub vegetarian  : bool,
    pub gluten_free : bool,
    pub dairy_free  : bool,
    pub organic     : bool,
}

impl DietaryFlags {
    pub fn any(&self) -> bool {
        let Self {
            vegan,
            vegetarian,
            gluten_free,
            dairy_free,
            organic,
        } = self;
        *vegan || *vegetarian || *gluten_free || *dairy_free || *organic
    }
}

/// A directory entry for a food source or business.
///
/// The moderation status is not part of the entity itself but
/// stored and passed alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub address: Address,
    pub pos: Option<MapPoint>,
    pub category: String,
    pub tags: Vec<String>,
    pub diets: DietaryFlags,
    /// Integer-rounded arithmetic mean of all ratings.
    pub avg_rating: Option<u8>,
    pub created: Activity,
}
