//! The closed set of opcodes understood by the firmware.

use crate::constants::*;
use crate::error::ProtocolError;

/// Opcodes carried in byte 2 of a host frame (and byte 0 of a firmware reply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// No-op.
    Noop,
    /// Generic error report.
    Err,
    /// Acknowledge.
    Ack,
    /// Negative acknowledge.
    Nack,
    /// Continuation chunk.
    Cont,
    /// Abort transfer.
    Abort,
    /// End of a segmented transfer.
    Complete,
    /// Debug hello.
    Hello,
    /// Debug echo.
    Echo,
    /// Disable the display.
    OledOff,
    /// Enable the display.
    OledOn,
    /// Begin a layer text update.
    OledUpdate,
    /// Reset layer text to firmware defaults.
    OledReset,
}

impl Opcode {
    /// Every opcode, in wire value order.
    pub const ALL: [Opcode; 13] = [
        Opcode::Noop,
        Opcode::Err,
        Opcode::Ack,
        Opcode::Nack,
        Opcode::Cont,
        Opcode::Abort,
        Opcode::Complete,
        Opcode::Hello,
        Opcode::Echo,
        Opcode::OledOff,
        Opcode::OledOn,
        Opcode::OledUpdate,
        Opcode::OledReset,
    ];

    /// The byte value on the wire.
    pub fn code(self) -> u8 {
        u8::from(self)
    }

    /// Whether this opcode carries a layer header (`layer`, `length`, chunk).
    pub fn is_layer_opcode(self) -> bool {
        matches!(self, Opcode::OledUpdate | Opcode::Cont | Opcode::Complete)
    }

    /// The firmware's name for this opcode.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Noop => "NOOP",
            Opcode::Err => "ERR",
            Opcode::Ack => "ACK",
            Opcode::Nack => "NACK",
            Opcode::Cont => "CONT",
            Opcode::Abort => "ABORT",
            Opcode::Complete => "COMPLETE",
            Opcode::Hello => "HELLO",
            Opcode::Echo => "ECHO",
            Opcode::OledOff => "OLED_OFF",
            Opcode::OledOn => "OLED_ON",
            Opcode::OledUpdate => "OLED_UPDATE",
            Opcode::OledReset => "OLED_RESET",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.code())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            OP_NOOP => Ok(Opcode::Noop),
            OP_ERR => Ok(Opcode::Err),
            OP_ACK => Ok(Opcode::Ack),
            OP_NACK => Ok(Opcode::Nack),
            OP_CONT => Ok(Opcode::Cont),
            OP_ABORT => Ok(Opcode::Abort),
            OP_COMPLETE => Ok(Opcode::Complete),
            OP_HELLO => Ok(Opcode::Hello),
            OP_ECHO => Ok(Opcode::Echo),
            OP_OLED_OFF => Ok(Opcode::OledOff),
            OP_OLED_ON => Ok(Opcode::OledOn),
            OP_OLED_UPDATE => Ok(Opcode::OledUpdate),
            OP_OLED_RESET => Ok(Opcode::OledReset),
            _ => Err(ProtocolError::UnknownOpcode(code)),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        match opcode {
            Opcode::Noop => OP_NOOP,
            Opcode::Err => OP_ERR,
            Opcode::Ack => OP_ACK,
            Opcode::Nack => OP_NACK,
            Opcode::Cont => OP_CONT,
            Opcode::Abort => OP_ABORT,
            Opcode::Complete => OP_COMPLETE,
            Opcode::Hello => OP_HELLO,
            Opcode::Echo => OP_ECHO,
            Opcode::OledOff => OP_OLED_OFF,
            Opcode::OledOn => OP_OLED_ON,
            Opcode::OledUpdate => OP_OLED_UPDATE,
            Opcode::OledReset => OP_OLED_RESET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_opcode_maps_back_to_itself() {
        for opcode in Opcode::ALL {
            assert_eq!(Opcode::try_from(opcode.code()), Ok(opcode));
        }
    }

    #[test]
    fn test_unknown_opcode_rejected() {
        assert_eq!(Opcode::try_from(0x07), Err(ProtocolError::UnknownOpcode(0x07)));
        assert_eq!(Opcode::try_from(0x52), Err(ProtocolError::UnknownOpcode(0x52)));
        assert_eq!(Opcode::try_from(0xFF), Err(ProtocolError::UnknownOpcode(0xFF)));
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(Opcode::Ack.code(), 0x02);
        assert_eq!(Opcode::Nack.code(), 0x03);
        assert_eq!(Opcode::OledUpdate.code(), 0x50);
        assert_eq!(Opcode::OledReset.code(), 0x51);
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::OledUpdate.to_string(), "OLED_UPDATE (0x50)");
    }
}
