//! Runs one parsed command against a keyboard client.

use std::io::{Read, Write};

use kbp_client::KeyboardClient;
use kbp_device::{DeviceDescriptor, HidBackend};
use kbp_protocol::LAYER_TEXT_CAPACITY;
use tracing::{info, warn};

use crate::args::{Command, OledState};
use crate::error::CliError;

/// Replace the two-character sequence `\n` with a newline.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Execute `command`. Raw frames are read from `--file` or else from `input`;
/// results are written to `out`.
pub fn run<B, R, W>(client: &mut KeyboardClient<B>, command: &Command, input: &mut R, out: &mut W) -> Result<(), CliError>
where
    B: HidBackend,
    R: Read,
    W: Write,
{
    match command {
        Command::Ls { json } => {
            let devices = client.resolver_mut().list_all()?;
            write_devices(&devices, *json, out)?;
        }
        Command::Info { json } => {
            let devices = client.matching_devices()?;
            if devices.is_empty() && !*json {
                writeln!(out, "No device matches {}", client.query())?;
            } else {
                write_devices(&devices, *json, out)?;
            }
        }
        Command::Hello => {
            let greeting = client.hello()?;
            writeln!(out, "{}", greeting)?;
        }
        Command::Echo { text } => {
            let echoed = client.echo(text)?;
            writeln!(out, "{}", echoed)?;
        }
        Command::Oled { state } => {
            client.oled_state(*state == OledState::On)?;
            writeln!(out, "OK")?;
        }
        Command::Reset => {
            client.layer_reset()?;
            writeln!(out, "OK")?;
        }
        Command::Layer { layer, text } => {
            let text = unescape_newlines(text);
            if text.len() > LAYER_TEXT_CAPACITY {
                warn!(
                    "Layer text is {} bytes; the display keeps at most {}",
                    text.len(),
                    LAYER_TEXT_CAPACITY
                );
            }
            info!("Programming layer {} with {:?}", layer, text);
            let summary = client.layer_update(*layer, &text)?;
            writeln!(out, "OK ({} bytes in {} frames)", summary.bytes, summary.data_frames)?;
        }
        Command::Raw { file } => {
            let data = match file {
                Some(path) => std::fs::read(path)?,
                None => {
                    let mut data = Vec::new();
                    input.read_to_end(&mut data)?;
                    data
                }
            };
            let response = client.send_raw(&data)?;
            writeln!(out, "{}", hex::encode(response.bytes()))?;
            writeln!(out, "{}", response.text_from(1))?;
        }
    }
    Ok(())
}

fn write_devices<W: Write>(devices: &[DeviceDescriptor], json: bool, out: &mut W) -> Result<(), CliError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, devices)?;
        writeln!(out)?;
    } else {
        for device in devices {
            writeln!(out, "{}", device.listing_line())?;
        }
    }
    Ok(())
}
