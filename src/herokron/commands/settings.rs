use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{parse_color, Registry, Webhook};
use crate::store::RegistryStore;

pub fn set_webhook<S: RegistryStore>(
    registry: &mut Registry,
    store: &mut S,
    url: &str,
) -> Result<CmdResult> {
    registry.webhook = Webhook::parse(url)?;
    store.save(registry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Discord webhook set."));
    Ok(result.with_registry(registry.clone()))
}

pub fn clear_webhook<S: RegistryStore>(registry: &mut Registry, store: &mut S) -> Result<CmdResult> {
    registry.webhook = Webhook::default();
    store.save(registry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Discord webhook cleared."));
    Ok(result.with_registry(registry.clone()))
}

pub fn set_color<S: RegistryStore>(
    registry: &mut Registry,
    store: &mut S,
    value: &str,
) -> Result<CmdResult> {
    registry.color = parse_color(value)?;
    store.save(registry)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Embed color set to #{:06X}.",
        registry.color
    )));
    Ok(result.with_registry(registry.clone()))
}
