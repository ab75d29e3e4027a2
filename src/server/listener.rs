use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::server::tcp::TcpStreamIo;
use crate::session::{ConnectionSession, ServerState};

const SOCKET_READ_SIZE: usize = 4096;

/// Bounds on discarding leftover peer input before the socket is dropped.
const LINGER_TIMEOUT: Duration = Duration::from_secs(2);
const LINGER_MAX_BYTES: usize = 1024 * 1024;

/// Binds the configured address and serves until the task is dropped.
///
/// Must run inside a `LocalSet`: sessions share the server state via `Rc`.
pub async fn run(cfg: &Config, server: Rc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, server, cfg.stream.write_window).await
}

/// Accepts connections on `listener`, one stream per socket.
pub async fn serve(
    listener: TcpListener,
    server: Rc<ServerState>,
    write_window: usize,
) -> anyhow::Result<()> {
    let mut next_id = 0u64;

    loop {
        let (socket, peer) = listener.accept().await?;
        next_id += 1;

        let conn = ConnectionSession::open(next_id, Rc::clone(&server), Some(peer.to_string()));
        tokio::task::spawn_local(async move {
            if let Err(e) = serve_socket(socket, conn, write_window).await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

/// Turns socket activity into stream events until the stream is done.
async fn serve_socket(
    socket: TcpStream,
    conn: ConnectionSession,
    write_window: usize,
) -> anyhow::Result<()> {
    let (mut rd, mut wr) = socket.into_split();
    let mut io = TcpStreamIo::new(write_window);
    let mut stream = conn.open_stream(0, &mut io);
    let mut scratch = vec![0u8; SOCKET_READ_SIZE];

    let result: anyhow::Result<()> = async {
        while !io.is_closed() {
            if io.wants_read() {
                if !io.has_input() {
                    match rd.read(&mut scratch).await {
                        Ok(0) => io.finish_input(),
                        Ok(n) => io.feed(&scratch[..n]),
                        Err(e) => io.fail_input(e),
                    }
                }
                stream.on_read(&mut io);
            } else if io.wants_write() {
                stream.on_write(&mut io);
                flush(&mut wr, &mut io).await?;
            } else {
                if io.is_write_shut() {
                    flush(&mut wr, &mut io).await?;
                    wr.shutdown().await?;
                    discard_input(&mut rd, &mut scratch).await;
                }
                break;
            }
        }
        Ok(())
    }
    .await;

    stream.on_close();
    conn.close();
    result
}

async fn flush(wr: &mut OwnedWriteHalf, io: &mut TcpStreamIo) -> std::io::Result<()> {
    let out = io.take_output();
    if !out.is_empty() {
        wr.write_all(&out).await?;
    }
    Ok(())
}

/// Reads and drops whatever the peer still sends, until EOF or a bound.
///
/// Dropping a socket with unread input makes the kernel answer with RST,
/// which can discard response bytes still in flight.
async fn discard_input(rd: &mut OwnedReadHalf, scratch: &mut [u8]) {
    let discard = async {
        let mut total = 0;
        while total < LINGER_MAX_BYTES {
            match rd.read(scratch).await {
                Ok(0) | Err(_) => break,
                Ok(n) => total += n,
            }
        }
        total
    };

    if let Ok(discarded) = tokio::time::timeout(LINGER_TIMEOUT, discard).await {
        if discarded > 0 {
            debug!(bytes = discarded, "Discarded input after request");
        }
    }
}
