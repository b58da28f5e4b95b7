//! Sensor link receive task
//!
//! Decodes sample lines from the sensor board and publishes them to the
//! controller. Ingestion stops for good when the link closes or a read
//! fails; the panel keeps running without live sensor data.

use defmt::*;
use embassy_rp::uart::{self, BufferedUartRx};
use embassy_time::Instant;
use embedded_io_async::Read;

use chime_protocol::{LineDecoder, BAUD_RATE};

use crate::channels::{DISPLAY_REFRESH, SAMPLES};
use crate::display::{LinkStatus, DISPLAY_STATE};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Why sample ingestion stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The UART reported an error
    Read(uart::Error),
}

/// Link RX task - receives sample lines from the sensor board
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started ({} baud)", BAUD_RATE);

    match read_samples(&mut rx).await {
        Ok(()) => info!("Sensor link closed, ingestion stopped"),
        Err(e) => error!("Sensor link failed, ingestion stopped: {:?}", e),
    }

    set_link_status(LinkStatus::Lost).await;
}

async fn read_samples(rx: &mut BufferedUartRx) -> Result<(), LinkError> {
    let mut decoder = LineDecoder::new();
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut receiving = false;

    loop {
        let n = rx.read(&mut buf).await.map_err(LinkError::Read)?;
        if n == 0 {
            if decoder.pending() > 0 {
                debug!("Dropping {} bytes of unterminated line", decoder.pending());
            }
            return Ok(());
        }
        trace!("RX: {} bytes", n);

        let at_ms = Instant::now().as_millis();
        for result in decoder.decode(&buf[..n]) {
            match result {
                Ok(reading) => {
                    trace!("Sample {}x{}", reading.potentiometer, reading.button);
                    SAMPLES.send(reading.stamp(at_ms)).await;
                    if !receiving {
                        receiving = true;
                        info!("Sensor samples arriving");
                        set_link_status(LinkStatus::Receiving).await;
                    }
                }
                Err(e) => warn!("Skipping malformed line: {:?}", e),
            }
        }
    }
}

async fn set_link_status(link: LinkStatus) {
    DISPLAY_STATE.lock().await.link = link;
    DISPLAY_REFRESH.signal(());
}
