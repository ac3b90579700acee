use super::PowerService;
use crate::config::ThemeConfig;

/// What: Suspends the battery energy saver through `powercfg`.
///
/// Details:
/// - Energy saver on battery prevents theme changes from sticking, so the
///   battery threshold is dropped to 0 before switching.
/// - Only acts when `disable_energy_saver` is configured and `powercfg` is on
///   `PATH`. Failures are logged and otherwise ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct PowercfgEnergySaver;

/// Arguments lowering the energy saver battery threshold of the active scheme.
const SET_THRESHOLD_ARGS: [&str; 5] = [
    "/setdcvalueindex",
    "SCHEME_CURRENT",
    "SUB_ENERGYSAVER",
    "ESBATTTHRESHOLD",
    "0",
];
/// Arguments re-applying the active scheme so the new threshold takes effect.
const ACTIVATE_ARGS: [&str; 2] = ["/setactive", "SCHEME_CURRENT"];

impl PowerService for PowercfgEnergySaver {
    fn request_disable_energy_saver(&self, config: &ThemeConfig) {
        if !config.disable_energy_saver {
            return;
        }
        let Ok(powercfg) = which::which("powercfg") else {
            tracing::debug!("powercfg not available; skipping energy saver suspension");
            return;
        };
        for args in [&SET_THRESHOLD_ARGS[..], &ACTIVATE_ARGS[..]] {
            match std::process::Command::new(&powercfg)
                .args(args)
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .status()
            {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    tracing::warn!(?args, code = ?status.code(), "powercfg returned an error");
                    return;
                }
                Err(e) => {
                    tracing::warn!(?args, error = %e, "failed to run powercfg");
                    return;
                }
            }
        }
        tracing::info!("energy saver suspended for theme switch");
    }
}
