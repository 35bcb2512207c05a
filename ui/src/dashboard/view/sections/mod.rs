pub(super) mod footer;
pub(super) mod header;
pub(super) mod sidebar;
