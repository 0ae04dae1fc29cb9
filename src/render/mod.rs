pub(crate) mod bezel;
pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod overlay;
pub(crate) mod phosphor;
pub(crate) mod pipeline;
