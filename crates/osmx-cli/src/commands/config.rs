use crate::output::OutputWriter;
use anyhow::Result;
use osmx_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let map = config.to_inspection_map();

    if output.is_json() {
        let values: serde_json::Map<String, serde_json::Value> = map
            .into_iter()
            .map(|(key, (value, source))| {
                (key, serde_json::json!({ "value": value, "source": source }))
            })
            .collect();
        return output.data(&values);
    }

    output.section("Configuration");
    for (key, (value, source)) in map {
        output.kv(key, format!("{} ({:?})", value, source));
    }
    Ok(())
}
