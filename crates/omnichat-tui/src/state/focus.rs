//! Focus management for panels
//!
//! Tracks which panel has focus and provides tab-order navigation.

/// Unique identifier for a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub usize);

impl PanelId {
    /// Provider list (left sidebar)
    pub const PROVIDERS: PanelId = PanelId(0);

    /// Conversation log (center)
    pub const CONVERSATION: PanelId = PanelId(1);

    /// Draft input (bottom)
    pub const INPUT: PanelId = PanelId(2);
}

/// Focus state management
pub struct FocusState {
    /// Currently focused panel
    current: PanelId,

    /// Focus ring (panels in tab order)
    ring: Vec<PanelId>,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusState {
    pub fn new() -> Self {
        Self {
            // Start at INPUT for immediate typing
            current: PanelId::INPUT,
            ring: vec![PanelId::PROVIDERS, PanelId::CONVERSATION, PanelId::INPUT],
        }
    }

    /// Get currently focused panel
    pub fn current(&self) -> PanelId {
        self.current
    }

    /// Check if a panel is focused
    pub fn is_focused(&self, id: PanelId) -> bool {
        self.current == id
    }

    /// Focus a specific panel; ids outside the ring are ignored
    pub fn focus(&mut self, id: PanelId) {
        if self.ring.contains(&id) {
            self.current = id;
        }
    }

    /// Cycle to next panel in ring
    pub fn next(&mut self) {
        if let Some(idx) = self.ring.iter().position(|&id| id == self.current) {
            self.current = self.ring[(idx + 1) % self.ring.len()];
        }
    }

    /// Cycle to previous panel in ring
    pub fn prev(&mut self) {
        if let Some(idx) = self.ring.iter().position(|&id| id == self.current) {
            let prev_idx = if idx == 0 { self.ring.len() - 1 } else { idx - 1 };
            self.current = self.ring[prev_idx];
        }
    }
}
