//! Keyboard command operations.
//!
//! Every operation resolves the target device, opens it, runs one exchange
//! (or one segmented transfer) and closes it again before returning, whether
//! it succeeded or not.

use kbp_device::{DeviceDescriptor, DeviceQuery, DeviceResolver, HidBackend};
use kbp_protocol::{AckResponse, Frame, Opcode, MAX_PAYLOAD_LEN};
use tracing::{debug, info};

use crate::error::ClientResult;
use crate::transfer::{exchange, send_segmented, TransferSummary, ACK_TIMEOUT};

/// Offset of the greeting in a hello reply (`ACK`, `HELLO`, text...).
const HELLO_TEXT_OFFSET: usize = 2;
/// Offset of the echoed text in an echo reply (`ACK`, text...).
const ECHO_TEXT_OFFSET: usize = 1;

/// Sends commands to the one device matching a query.
#[derive(Debug)]
pub struct KeyboardClient<B> {
    resolver: DeviceResolver<B>,
    query: DeviceQuery,
}

impl<B: HidBackend> KeyboardClient<B> {
    /// Create a client that targets the device matching `query`.
    pub fn new(backend: B, query: DeviceQuery) -> Self {
        KeyboardClient {
            resolver: DeviceResolver::new(backend),
            query,
        }
    }

    /// The query every operation resolves.
    pub fn query(&self) -> &DeviceQuery {
        &self.query
    }

    /// The resolver, for listing devices.
    pub fn resolver_mut(&mut self) -> &mut DeviceResolver<B> {
        &mut self.resolver
    }

    /// Consume the client, returning the backend.
    pub fn into_backend(self) -> B {
        self.resolver.into_backend()
    }

    /// Devices matching the client's query.
    pub fn matching_devices(&mut self) -> ClientResult<Vec<DeviceDescriptor>> {
        Ok(self.resolver.query(&self.query)?)
    }

    /// Ask the firmware to say hello. Returns the greeting.
    pub fn hello(&mut self) -> ClientResult<String> {
        let frame = Frame::simple(Opcode::Hello, &[])?;
        let response = self.send_frame(&frame)?;
        let text = response.text_from(HELLO_TEXT_OFFSET);
        info!("Got hello response: {}", text);
        Ok(text)
    }

    /// Have the firmware echo `text` back.
    ///
    /// Text longer than one frame's payload is truncated to fit; echo is never
    /// segmented.
    pub fn echo(&mut self, text: &str) -> ClientResult<String> {
        let bytes = text.as_bytes();
        let bytes = &bytes[..bytes.len().min(MAX_PAYLOAD_LEN)];
        if bytes.len() < text.len() {
            debug!("Truncating echo text from {} to {} bytes", text.len(), bytes.len());
        }
        let frame = Frame::simple(Opcode::Echo, bytes)?;
        let response = self.send_frame(&frame)?;
        let echoed = response.text_from(ECHO_TEXT_OFFSET);
        info!("Got echo response: {}", echoed);
        Ok(echoed)
    }

    /// Turn the OLED on or off.
    pub fn oled_state(&mut self, on: bool) -> ClientResult<()> {
        let opcode = if on { Opcode::OledOn } else { Opcode::OledOff };
        self.send_command(opcode)
    }

    /// Restore the firmware's default text on every layer.
    pub fn layer_reset(&mut self) -> ClientResult<()> {
        self.send_command(Opcode::OledReset)
    }

    /// Replace the text shown for `layer`.
    pub fn layer_update(&mut self, layer: u8, text: &str) -> ClientResult<TransferSummary> {
        self.with_device(|handle| send_segmented(handle, Opcode::OledUpdate, layer, text.as_bytes()))
    }

    /// Send operator-supplied bytes as one frame (zero padded) and return the
    /// acknowledged response.
    pub fn send_raw(&mut self, data: &[u8]) -> ClientResult<AckResponse> {
        let frame = Frame::from_raw(data)?;
        self.send_frame(&frame)
    }

    fn send_command(&mut self, opcode: Opcode) -> ClientResult<()> {
        let frame = Frame::simple(opcode, &[])?;
        debug!("Sending {}", opcode);
        self.send_frame(&frame).map(|_| ())
    }

    fn send_frame(&mut self, frame: &Frame) -> ClientResult<AckResponse> {
        self.with_device(|handle| exchange(handle, frame, ACK_TIMEOUT))
    }

    /// Resolve and open the device, run `f`, and close the device.
    fn with_device<R>(
        &mut self,
        f: impl FnOnce(&mut B::Handle) -> ClientResult<R>,
    ) -> ClientResult<R> {
        let device = self.resolver.resolve_unique(&self.query)?;
        let mut handle = self.resolver.open(&device)?;
        f(&mut handle)
    }
}
