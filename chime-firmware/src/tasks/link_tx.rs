//! Sensor link transmit task
//!
//! Sends alarm time commands to the sensor board.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::COMMANDS;

/// Link TX task - writes queued device commands to the UART
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let command = COMMANDS.receive().await;

        let line = match command.encode() {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to encode {:?}: {:?}", command, e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send {:?}: {:?}", command, e);
        } else {
            debug!("Sent {:?}", command);
        }
    }
}
