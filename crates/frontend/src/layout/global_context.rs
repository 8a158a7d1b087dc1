use leptos::prelude::*;

/// Shell state shared by the header and the sidebar
#[derive(Clone, Copy)]
pub struct LayoutContext {
    pub left_open: RwSignal<bool>,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self {
            left_open: RwSignal::new(true),
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_left() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = LayoutContext::new();
            assert!(ctx.left_open.get_untracked());
            ctx.toggle_left();
            assert!(!ctx.left_open.get_untracked());
        });
    }
}
