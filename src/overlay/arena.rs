use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assets::color::Color;
use crate::foundation::error::{SnapError, SnapResult};
use crate::overlay::item::{
    ItemId, ItemTransform, OverlayItem, STICKER_BASE_SIZE, Sticker, TextItem,
};

/// On-screen size of the editable preview, in reference units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

/// Offset of a new text item's top-left from the preview center.
const TEXT_SPAWN_OFFSET: (f64, f64) = (50.0, 20.0);

#[derive(Clone, Copy, Debug)]
struct Drag {
    id: ItemId,
    origin_x: f64,
    origin_y: f64,
}

/// Overlay items of one editing session, keyed by id.
///
/// Ids are handed out in increasing order, so iterating the map yields insertion order, which is
/// also the paint order. Selection never changes that order.
#[derive(Debug, Default)]
pub struct OverlayArena {
    items: BTreeMap<ItemId, OverlayItem>,
    next_id: u64,
    selected: Option<ItemId>,
    drag: Option<Drag>,
}

impl OverlayArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    /// Add a sticker centered in the preview and select it.
    pub fn add_sticker(&mut self, source: Arc<[u8]>, preview: PreviewSize) -> ItemId {
        let half = STICKER_BASE_SIZE / 2.0;
        let transform = ItemTransform::at(preview.width / 2.0 - half, preview.height / 2.0 - half);
        self.insert_sticker(source, transform)
    }

    pub fn insert_sticker(&mut self, source: Arc<[u8]>, transform: ItemTransform) -> ItemId {
        let id = self.alloc_id();
        self.items.insert(
            id,
            OverlayItem::Sticker(Sticker {
                id,
                source,
                transform,
            }),
        );
        self.selected = Some(id);
        id
    }

    /// Add a text item near the preview center and select it.
    ///
    /// Blank content is rejected and nothing is created.
    pub fn add_text(
        &mut self,
        content: &str,
        color: Color,
        preview: PreviewSize,
    ) -> SnapResult<ItemId> {
        let transform = ItemTransform::at(
            preview.width / 2.0 - TEXT_SPAWN_OFFSET.0,
            preview.height / 2.0 - TEXT_SPAWN_OFFSET.1,
        );
        self.insert_text(content, color, transform)
    }

    pub fn insert_text(
        &mut self,
        content: &str,
        color: Color,
        transform: ItemTransform,
    ) -> SnapResult<ItemId> {
        if content.trim().is_empty() {
            return Err(SnapError::validation("text content must not be empty"));
        }
        let id = self.alloc_id();
        self.items.insert(
            id,
            OverlayItem::Text(TextItem {
                id,
                content: content.to_owned(),
                color,
                transform,
            }),
        );
        self.selected = Some(id);
        Ok(id)
    }

    pub fn get(&self, id: ItemId) -> Option<&OverlayItem> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// Select `id`, or clear the selection with `None`. Unknown ids are an error.
    pub fn select(&mut self, id: Option<ItemId>) -> SnapResult<()> {
        if let Some(id) = id
            && !self.items.contains_key(&id)
        {
            return Err(SnapError::validation(format!("no overlay item {id}")));
        }
        self.selected = id;
        Ok(())
    }

    pub fn delete(&mut self, id: ItemId) -> Option<OverlayItem> {
        let removed = self.items.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.drag.is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        removed
    }

    pub fn delete_selected(&mut self) -> Option<OverlayItem> {
        let id = self.selected?;
        self.delete(id)
    }

    /// Add `delta` to the selected item's scale, clamped to its kind's range.
    pub fn scale_selected(&mut self, delta: f64) -> bool {
        let Some(item) = self.selected_mut() else {
            return false;
        };
        let kind = item.kind();
        let t = item.transform_mut();
        t.scale = kind.clamp_scale(t.scale + delta);
        true
    }

    /// Add `degrees` to the selected item's rotation.
    pub fn rotate_selected(&mut self, degrees: f64) -> bool {
        let Some(item) = self.selected_mut() else {
            return false;
        };
        item.transform_mut().rotation += degrees;
        true
    }

    fn selected_mut(&mut self) -> Option<&mut OverlayItem> {
        let id = self.selected?;
        self.items.get_mut(&id)
    }

    /// Start moving `id`; it becomes selected.
    pub fn begin_drag(&mut self, id: ItemId) -> SnapResult<()> {
        let item = self
            .items
            .get(&id)
            .ok_or_else(|| SnapError::validation(format!("no overlay item {id}")))?;
        let t = item.transform();
        self.drag = Some(Drag {
            id,
            origin_x: t.x,
            origin_y: t.y,
        });
        self.selected = Some(id);
        Ok(())
    }

    /// Move the dragged item to its start position plus the total pointer delta.
    pub fn update_drag(&mut self, dx: f64, dy: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(item) = self.items.get_mut(&drag.id) else {
            return false;
        };
        let t = item.transform_mut();
        t.x = drag.origin_x + dx;
        t.y = drag.origin_y + dy;
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn items(&self) -> impl Iterator<Item = &OverlayItem> {
        self.items.values()
    }

    /// Stickers in paint order.
    pub fn stickers(&self) -> impl Iterator<Item = &Sticker> {
        self.items.values().filter_map(|item| match item {
            OverlayItem::Sticker(s) => Some(s),
            OverlayItem::Text(_) => None,
        })
    }

    /// Text items in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.values().filter_map(|item| match item {
            OverlayItem::Text(t) => Some(t),
            OverlayItem::Sticker(_) => None,
        })
    }

    /// Drop every item and the selection. Ids keep counting up.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.drag = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/arena.rs"]
mod tests;
