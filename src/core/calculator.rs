use crate::core::{Character, CharacterWithHits, Damage, Group, GroupCollection};
use std::collections::BTreeMap;

/// 以整數無條件進位除法計算所需擊數：ceil(hp / damage)
///
/// `hp = 0` 回傳 0，loader 會先排除這種記錄。
pub fn hits_required(hp: u64, damage: Damage) -> u64 {
    hp.div_ceil(damage.get())
}

/// 計算每個角色所需擊數並依擊數分組
///
/// 群組依擊數遞增排列；群組內依 hp 遞增，hp 相同時保留輸入順序。
pub fn compute(characters: &[Character], damage: Damage) -> GroupCollection {
    let mut buckets: BTreeMap<u64, Vec<CharacterWithHits>> = BTreeMap::new();

    for character in characters {
        let hits = hits_required(character.hp, damage);
        buckets.entry(hits).or_default().push(CharacterWithHits {
            character: character.clone(),
            hits_required: hits,
        });
    }

    let groups = buckets
        .into_iter()
        .map(|(hits, mut members)| {
            // sort_by_key is stable
            members.sort_by_key(|m| m.character.hp);
            Group {
                hits,
                characters: members,
            }
        })
        .collect();

    tracing::debug!(
        "Grouped {} characters with damage {}",
        characters.len(),
        damage
    );

    GroupCollection::from_sorted(groups)
}
