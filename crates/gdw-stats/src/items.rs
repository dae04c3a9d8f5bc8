//! Tracked-item extraction from the furnidata document.

use serde_json::Value;

/// Furnilines whose items are never tracked (event and placeholder lines).
const EXCLUDED_FURNILINE: &[&str] = &[
    "room_noob",
    "buildersclub",
    "buildersclub_alpha1",
    "testing",
    "sanrio",
    "room_xbar",
    "room_pcnc15",
    "room_hall15",
    "room_info15",
    "room_thr15",
    "room_cof15",
    "habbo15",
    "room_welcomelounge",
    "spaces",
    "newbie",
    "room_gh15",
    "room_hcl15",
    "room_wl15",
    "room_picnic",
    "room_theatredome",
    "room_lido",
];

/// Whether an item hangs on a wall or stands in a room. Selects the stats
/// endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Room,
    Wall,
}

/// One tracked marketplace item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRef {
    pub classname: String,
    pub kind: ItemKind,
}

/// Extract the tracked items from a furnidata document.
///
/// Walks `roomitemtypes.furnitype[]` and `wallitemtypes.furnitype[]`,
/// skipping NFT and builders-club classnames and excluded furnilines.
pub fn extract_items(furnidata: &Value) -> Vec<ItemRef> {
    let mut items = Vec::new();
    collect(furnidata, "roomitemtypes", ItemKind::Room, &mut items);
    collect(furnidata, "wallitemtypes", ItemKind::Wall, &mut items);
    items
}

fn collect(furnidata: &Value, section: &str, kind: ItemKind, items: &mut Vec<ItemRef>) {
    let Some(entries) = furnidata
        .get(section)
        .and_then(|s| s.get("furnitype"))
        .and_then(|f| f.as_array())
    else {
        return;
    };

    for entry in entries {
        let classname = entry
            .get("classname")
            .and_then(|c| c.as_str())
            .unwrap_or_default();
        if classname.is_empty() || classname.starts_with("nft_") || classname.starts_with("bc_") {
            continue;
        }
        let furniline = entry
            .get("furniline")
            .and_then(|f| f.as_str())
            .unwrap_or_default();
        if !furniline.is_empty() && EXCLUDED_FURNILINE.contains(&furniline.to_lowercase().as_str())
        {
            continue;
        }
        items.push(ItemRef {
            classname: classname.to_string(),
            kind,
        });
    }
}
