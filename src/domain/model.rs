use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// 資料來源中的一筆角色記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(alias = "nome")]
    pub name: String,
    pub hp: u64,
    #[serde(alias = "emoji")]
    pub icon: String,
}

impl Character {
    pub fn new(name: impl Into<String>, hp: u64, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp,
            icon: icon.into(),
        }
    }
}

/// 每一擊的傷害值，必定大於零
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Damage(NonZeroU64);

impl Damage {
    pub const DEFAULT: Damage = match NonZeroU64::new(2600) {
        Some(value) => Damage(value),
        None => unreachable!(),
    };

    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for Damage {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Damage::new(value).ok_or_else(|| "damage must be greater than zero".to_string())
    }
}

impl From<Damage> for u64 {
    fn from(damage: Damage) -> Self {
        damage.get()
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterWithHits {
    #[serde(flatten)]
    pub character: Character,
    pub hits_required: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub hits: u64,
    pub characters: Vec<CharacterWithHits>,
}

/// 依所需擊數由小到大排序的群組
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupCollection {
    groups: Vec<Group>,
}

impl GroupCollection {
    /// Caller guarantees `groups` is ordered ascending by `hits`.
    pub(crate) fn from_sorted(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn total_characters(&self) -> usize {
        self.groups.iter().map(|g| g.characters.len()).sum()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn keys(&self) -> Vec<u64> {
        self.groups.iter().map(|g| g.hits).collect()
    }
}

impl<'a> IntoIterator for &'a GroupCollection {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// 每次計算請求的序號，只會遞增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
