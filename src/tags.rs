use std::error::Error;

/// Normalize a tag: trimmed and lowercased
pub fn normalize_tag(t: &str) -> String {
    t.trim().to_lowercase()
}

/// Normalize a list of tags, dropping empties and repeats (first one wins)
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for t in tags {
        let t = normalize_tag(t.as_ref());
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

/// Tags requested by `tag <id> add ... remove ...`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TagActions {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

/// Parse `add a b remove c` style arguments
pub fn parse_tag_actions(args: &[String]) -> Result<TagActions, Box<dyn Error>> {
    enum Mode {
        Add,
        Remove,
    }
    let mut mode = None;
    let mut actions = TagActions::default();

    for arg in args {
        let lower = normalize_tag(arg);
        match (lower.as_str(), &mode) {
            ("add", _) => mode = Some(Mode::Add),
            ("remove", _) => mode = Some(Mode::Remove),
            ("", _) => {}
            (_, Some(Mode::Add)) => actions.add.push(lower),
            (_, Some(Mode::Remove)) => actions.remove.push(lower),
            (_, None) => {
                return Err(format!(
                    "Expected 'add' or 'remove' before '{arg}'"
                )
                .into());
            }
        }
    }

    if actions.add.is_empty() && actions.remove.is_empty() {
        return Err("No tags specified to add or remove.".into());
    }
    Ok(actions)
}

/// Outcome of applying tag actions to an entry's tag list
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TagChange {
    pub tags: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// Apply additions then removals. Existing tags are lowercased first.
pub fn apply(current: &[String], actions: &TagActions) -> TagChange {
    let mut tags: Vec<String> = current.iter().map(|t| t.to_lowercase()).collect();
    let mut change = TagChange::default();

    for t in &actions.add {
        if !tags.contains(t) {
            tags.push(t.clone());
            change.added.push(t.clone());
        }
    }
    for t in &actions.remove {
        if let Some(pos) = tags.iter().position(|x| x == t) {
            tags.remove(pos);
            change.removed.push(t.clone());
        }
    }
    change.tags = tags;
    change
}

/// Hash a tag for deterministic color selection
pub fn hash_tag(tag: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in tag.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

/// Get color for a tag based on hash
pub fn color_for_tag(tag: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (120, 220, 232),
        (169, 220, 118),
        (255, 216, 102),
        (252, 152, 103),
        (171, 157, 242),
        (255, 97, 136),
        (148, 226, 213),
        (245, 194, 231),
        (186, 225, 255),
        (255, 214, 165),
        (204, 255, 229),
        (214, 182, 255),
    ];
    let h = hash_tag(tag);
    PALETTE[(h as usize) % PALETTE.len()]
}
