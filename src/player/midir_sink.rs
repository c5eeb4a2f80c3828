use super::{MessageFramer, MidiSink, SinkResult};
use crate::reader::SinkError;
use alloc::{string::String, string::ToString, vec::Vec};
use midir::{MidiOutput, MidiOutputConnection};

/// Name this crate registers with the system MIDI service
pub const CLIENT_NAME: &str = "smfplay";

/// List the output ports the system currently offers.
pub fn output_port_names() -> SinkResult<Vec<String>> {
    let output = MidiOutput::new(CLIENT_NAME).map_err(transport)?;
    Ok(output
        .ports()
        .iter()
        .map(|port| {
            output
                .port_name(port)
                .unwrap_or_else(|_| "<unnamed>".to_string())
        })
        .collect())
}

#[doc = r#"
Sends to a hardware or virtual MIDI port through `midir`.

Bytes are framed into whole messages before being handed to the port, so
the connection always receives one complete message per send.
"#]
pub struct MidirSink {
    connection: MidiOutputConnection,
    framer: MessageFramer,
    port_name: String,
}

impl MidirSink {
    /// Connect to the output port at `index` in [`output_port_names`] order.
    pub fn connect(index: usize) -> SinkResult<Self> {
        let output = MidiOutput::new(CLIENT_NAME).map_err(transport)?;
        let ports = output.ports();
        let port = ports.get(index).ok_or(SinkError::Disconnected)?;
        let port_name = output.port_name(port).map_err(transport)?;
        let connection = output
            .connect(port, "smfplay-out")
            .map_err(transport)?;
        #[cfg(feature = "tracing")]
        tracing::info!(port = %port_name, "connected to midi output");
        Ok(Self {
            connection,
            framer: MessageFramer::new(),
            port_name,
        })
    }

    /// Name of the connected port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Close the connection.
    pub fn close(self) {
        self.connection.close();
    }
}

impl MidiSink for MidirSink {
    fn send(&mut self, byte: u8) -> SinkResult<()> {
        if let Some(message) = self.framer.push(byte) {
            self.connection.send(message).map_err(transport)?;
        }
        Ok(())
    }

    /// Discards a message still missing bytes, such as a system exclusive
    /// message whose payload was cut before its `F7`. Ports only accept
    /// whole messages.
    fn flush(&mut self) -> SinkResult<()> {
        let _status = self.framer.pending_status();
        let dropped = self.framer.reset();
        if dropped > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                dropped,
                status = _status.unwrap_or_default(),
                "discarded an incomplete message on flush, raise the payload cap to send long system exclusive messages"
            );
        }
        Ok(())
    }
}

fn transport(e: impl core::fmt::Display) -> SinkError {
    SinkError::Transport(e.to_string())
}
