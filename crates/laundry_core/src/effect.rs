#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartRefresh { refresh_id: crate::RefreshId },
}
