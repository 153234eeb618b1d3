#![forbid(unsafe_code)]

//! The menu item model.
//!
//! A [`MenuItem`] carries the fields every variant shares (identifier,
//! content, disabled flag, user data) plus a tagged union for the
//! variant-specific state:
//!
//! - **Button**: plain clickable row with an optional click handler.
//! - **CheckBox**: adds a `checked` flag, flipped once per activation
//!   before the handler runs.
//! - **Label**: static text, no activation.
//! - **Rule**: horizontal divider, no content or activation.
//! - **Input**: single-line text field with grapheme-aware editing, IME
//!   composition, and an Enter-to-submit handler.
//!
//! Builder methods that do not apply to an item's variant are silent
//! no-ops; malformed configuration degrades rather than erroring.

use std::any::Any;
use std::fmt;

use popmenu_core::event::{ImeEvent, ImePhase, KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::menu::Menu;

/// Handler invoked on item activation, after the menu has closed.
///
/// The activated item is detached from the menu for the duration of the
/// call: mutate it through the `&mut MenuItem` argument, and reach sibling
/// items through the `&mut Menu` id lookup.
pub type MenuHandler = Box<dyn FnMut(&mut Menu, &mut MenuItem)>;

/// Minimum display width reserved for an input item's text field.
const INPUT_FIELD_MIN_WIDTH: u16 = 8;

/// Public discriminant for a menu item's variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemVariant {
    /// Clickable row.
    Button,
    /// Clickable row with a checked flag.
    CheckBox,
    /// Static text row.
    Label,
    /// Horizontal divider.
    Rule,
    /// Single-line text input.
    Input,
}

/// Variant-specific state.
enum ItemKind {
    Button {
        on_click: Option<MenuHandler>,
    },
    CheckBox {
        checked: bool,
        on_click: Option<MenuHandler>,
    },
    Label,
    Rule,
    Input(InputState),
}

/// State for the text-input variant.
struct InputState {
    value: String,
    placeholder: String,
    /// Cursor position as a grapheme index into `value`.
    cursor: usize,
    /// Active IME preedit, if a composition is in progress.
    composition: Option<String>,
    on_submit: Option<MenuHandler>,
}

impl InputState {
    fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
            composition: None,
            on_submit: None,
        }
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert_text(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.value.insert_str(at, text);
        self.cursor += text.graphemes(true).count();
    }

    fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }
}

/// One entry of a context menu.
pub struct MenuItem {
    id: Option<String>,
    content: String,
    disabled: bool,
    fit_content: bool,
    user_data: Option<Box<dyn Any>>,
    kind: ItemKind,
}

impl MenuItem {
    fn with_kind(content: String, kind: ItemKind) -> Self {
        Self {
            id: None,
            content,
            disabled: false,
            fit_content: false,
            user_data: None,
            kind,
        }
    }

    /// Create a clickable item.
    #[must_use]
    pub fn button(content: impl Into<String>) -> Self {
        Self::with_kind(content.into(), ItemKind::Button { on_click: None })
    }

    /// Create a checkbox item (unchecked).
    #[must_use]
    pub fn checkbox(content: impl Into<String>) -> Self {
        Self::with_kind(
            content.into(),
            ItemKind::CheckBox {
                checked: false,
                on_click: None,
            },
        )
    }

    /// Create a static text row.
    #[must_use]
    pub fn label(content: impl Into<String>) -> Self {
        Self::with_kind(content.into(), ItemKind::Label)
    }

    /// Create a horizontal divider.
    #[must_use]
    pub fn rule() -> Self {
        Self::with_kind(String::new(), ItemKind::Rule)
    }

    /// Create a text-input item; `label` is shown before the field.
    #[must_use]
    pub fn input(label: impl Into<String>) -> Self {
        Self::with_kind(label.into(), ItemKind::Input(InputState::new()))
    }

    /// Placeholder used while an item is detached for handler dispatch.
    pub(crate) fn detached() -> Self {
        Self::rule()
    }

    // --- Builder methods ---

    /// Set the identifier (builder). Empty identifiers are ignored.
    ///
    /// An item constructed with empty content inherits the identifier as
    /// its content.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if id.is_empty() {
            return self;
        }
        if self.content.is_empty() && !matches!(self.kind, ItemKind::Rule) {
            self.content = id.clone();
        }
        self.id = Some(id);
        self
    }

    /// Set the disabled flag (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Make the row hit area hug its content width (builder).
    #[must_use]
    pub fn with_fit_content(mut self, fit_content: bool) -> Self {
        self.fit_content = fit_content;
        self
    }

    /// Attach arbitrary user data (builder).
    #[must_use]
    pub fn with_user_data<T: Any>(mut self, data: T) -> Self {
        self.user_data = Some(Box::new(data));
        self
    }

    /// Set the initial checked state (builder). No-op unless a checkbox.
    #[must_use]
    pub fn with_checked(mut self, value: bool) -> Self {
        if let ItemKind::CheckBox { checked, .. } = &mut self.kind {
            *checked = value;
        }
        self
    }

    /// Set the initial field value (builder). No-op unless an input.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        if let ItemKind::Input(input) = &mut self.kind {
            input.value = value.into();
            input.cursor = input.grapheme_count();
        }
        self
    }

    /// Set the placeholder text (builder). No-op unless an input.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        if let ItemKind::Input(input) = &mut self.kind {
            input.placeholder = placeholder.into();
        }
        self
    }

    /// Set the click handler (builder). No-op unless a button or checkbox.
    #[must_use]
    pub fn on_click(mut self, handler: impl FnMut(&mut Menu, &mut MenuItem) + 'static) -> Self {
        match &mut self.kind {
            ItemKind::Button { on_click } | ItemKind::CheckBox { on_click, .. } => {
                *on_click = Some(Box::new(handler));
            }
            _ => {}
        }
        self
    }

    /// Set the submit handler (builder). No-op unless an input.
    #[must_use]
    pub fn on_submit(mut self, handler: impl FnMut(&mut Menu, &mut MenuItem) + 'static) -> Self {
        if let ItemKind::Input(input) = &mut self.kind {
            input.on_submit = Some(Box::new(handler));
        }
        self
    }

    // --- Accessors ---

    /// The item's identifier, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The item's variant.
    #[must_use]
    pub fn variant(&self) -> ItemVariant {
        match self.kind {
            ItemKind::Button { .. } => ItemVariant::Button,
            ItemKind::CheckBox { .. } => ItemVariant::CheckBox,
            ItemKind::Label => ItemVariant::Label,
            ItemKind::Rule => ItemVariant::Rule,
            ItemKind::Input(_) => ItemVariant::Input,
        }
    }

    /// The content text (the label, for input items).
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content text.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Whether the item is disabled.
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the item.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether the row's hit area hugs its content.
    #[must_use]
    pub fn fit_content(&self) -> bool {
        self.fit_content
    }

    /// The checked state. Always `false` for non-checkbox items.
    #[must_use]
    pub fn checked(&self) -> bool {
        matches!(self.kind, ItemKind::CheckBox { checked: true, .. })
    }

    /// Set the checked state. No-op unless a checkbox.
    pub fn set_checked(&mut self, value: bool) {
        if let ItemKind::CheckBox { checked, .. } = &mut self.kind {
            *checked = value;
        }
    }

    /// The field value. Empty for non-input items.
    #[must_use]
    pub fn value(&self) -> &str {
        match &self.kind {
            ItemKind::Input(input) => &input.value,
            _ => "",
        }
    }

    /// Replace the field value, clamping the cursor. No-op unless an input.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if let ItemKind::Input(input) = &mut self.kind {
            input.value = value.into();
            input.cursor = input.cursor.min(input.grapheme_count());
        }
    }

    /// The placeholder text. Empty for non-input items.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        match &self.kind {
            ItemKind::Input(input) => &input.placeholder,
            _ => "",
        }
    }

    /// Replace the placeholder text. No-op unless an input.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        if let ItemKind::Input(input) = &mut self.kind {
            input.placeholder = placeholder.into();
        }
    }

    /// Whether an IME composition is active on this input.
    #[must_use]
    pub fn composing(&self) -> bool {
        matches!(&self.kind, ItemKind::Input(input) if input.composition.is_some())
    }

    /// Borrow the attached user data, if it has the requested type.
    #[must_use]
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_ref()?.downcast_ref()
    }

    // --- Internal hooks used by the menu ---

    /// Whether activation closes the menu and fires a handler.
    pub(crate) fn activates(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Button { .. } | ItemKind::CheckBox { .. }
        )
    }

    /// Flip the checked state. No-op unless a checkbox.
    pub(crate) fn toggle(&mut self) {
        if let ItemKind::CheckBox { checked, .. } = &mut self.kind {
            *checked = !*checked;
        }
    }

    pub(crate) fn take_click(&mut self) -> Option<MenuHandler> {
        match &mut self.kind {
            ItemKind::Button { on_click } | ItemKind::CheckBox { on_click, .. } => on_click.take(),
            _ => None,
        }
    }

    /// Reattach a click handler taken for dispatch, unless the handler
    /// installed a replacement in the meantime.
    pub(crate) fn restore_click(&mut self, handler: MenuHandler) {
        match &mut self.kind {
            ItemKind::Button { on_click } | ItemKind::CheckBox { on_click, .. }
                if on_click.is_none() =>
            {
                *on_click = Some(handler);
            }
            _ => {}
        }
    }

    pub(crate) fn take_submit(&mut self) -> Option<MenuHandler> {
        match &mut self.kind {
            ItemKind::Input(input) => input.on_submit.take(),
            _ => None,
        }
    }

    pub(crate) fn restore_submit(&mut self, handler: MenuHandler) {
        if let ItemKind::Input(input) = &mut self.kind
            && input.on_submit.is_none()
        {
            input.on_submit = Some(handler);
        }
    }

    /// Cursor position (grapheme index) for rendering. Zero for non-inputs.
    pub(crate) fn cursor(&self) -> usize {
        match &self.kind {
            ItemKind::Input(input) => input.cursor,
            _ => 0,
        }
    }

    /// Active preedit text, if any.
    pub(crate) fn composition(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Input(input) => input.composition.as_deref(),
            _ => None,
        }
    }

    /// The field value split at the cursor, for rendering.
    pub(crate) fn value_split_at_cursor(&self) -> (&str, &str) {
        match &self.kind {
            ItemKind::Input(input) => input.value.split_at(input.byte_offset(input.cursor)),
            _ => ("", ""),
        }
    }

    /// Handle an editing key on an input item.
    ///
    /// Returns `true` if the key was consumed. Enter is not handled here;
    /// submission is orchestrated by the menu. While a composition is
    /// active, editing keys are consumed without effect (the IME owns
    /// them).
    pub(crate) fn input_edit(&mut self, key: &KeyEvent) -> bool {
        let ItemKind::Input(input) = &mut self.kind else {
            return false;
        };
        if input.composition.is_some() {
            return matches!(
                key.code,
                KeyCode::Char(_)
                    | KeyCode::Backspace
                    | KeyCode::Delete
                    | KeyCode::Left
                    | KeyCode::Right
                    | KeyCode::Home
                    | KeyCode::End
            );
        }
        match key.code {
            KeyCode::Char(c) if !key.ctrl() => {
                let mut buf = [0u8; 4];
                input.insert_text(c.encode_utf8(&mut buf));
                true
            }
            KeyCode::Backspace => {
                input.delete_back();
                true
            }
            KeyCode::Delete => {
                input.delete_forward();
                true
            }
            KeyCode::Left => {
                input.cursor = input.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                input.cursor = (input.cursor + 1).min(input.grapheme_count());
                true
            }
            KeyCode::Home => {
                input.cursor = 0;
                true
            }
            KeyCode::End => {
                input.cursor = input.grapheme_count();
                true
            }
            _ => false,
        }
    }

    /// Handle an IME composition event on an input item.
    pub(crate) fn input_ime(&mut self, ime: &ImeEvent) -> bool {
        let ItemKind::Input(input) = &mut self.kind else {
            return false;
        };
        match ime.phase {
            ImePhase::Start => {
                if input.composition.is_none() {
                    input.composition = Some(String::new());
                }
                true
            }
            ImePhase::Update => {
                input.composition = Some(ime.text.clone());
                true
            }
            ImePhase::Commit => {
                let had_composition = input.composition.take().is_some();
                if !ime.text.is_empty() {
                    input.insert_text(&ime.text);
                    true
                } else {
                    had_composition
                }
            }
            ImePhase::Cancel => input.composition.take().is_some(),
        }
    }

    /// Display width of the row's content, excluding borders.
    pub(crate) fn row_width(&self) -> u16 {
        let content = self.content.width() as u16;
        match &self.kind {
            ItemKind::Button { .. } | ItemKind::Label => content,
            // Check-mark affordance column plus a gap.
            ItemKind::CheckBox { .. } => content.saturating_add(2),
            ItemKind::Rule => 0,
            ItemKind::Input(input) => {
                let field = (input.value.width() as u16)
                    .max(input.placeholder.width() as u16)
                    .max(INPUT_FIELD_MIN_WIDTH);
                // "label: " separator between label and field.
                content.saturating_add(2).saturating_add(field)
            }
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MenuItem");
        s.field("variant", &self.variant())
            .field("id", &self.id)
            .field("content", &self.content)
            .field("disabled", &self.disabled);
        match &self.kind {
            ItemKind::CheckBox { checked, .. } => {
                s.field("checked", checked);
            }
            ItemKind::Input(input) => {
                s.field("value", &input.value);
            }
            _ => {}
        }
        s.finish_non_exhaustive()
    }
}
