//! Scripted peers for probe integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use healthcheck::ProbeConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::oneshot;

/// A peer that serves one connection and hands back the request it saw.
pub struct MockPeer {
    pub addr: SocketAddr,
    request: oneshot::Receiver<Vec<u8>>,
}

impl MockPeer {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// The raw request bytes the peer received.
    pub async fn request(self) -> Vec<u8> {
        self.request.await.unwrap_or_default()
    }
}

/// Start a peer that answers with `response` in one write, then closes.
pub async fn start_mock_peer(response: &'static [u8]) -> MockPeer {
    start_scripted_peer(vec![response], Duration::ZERO).await
}

/// Start a peer that writes `chunks` one at a time with `delay` in between, then closes.
pub async fn start_scripted_peer(chunks: Vec<&'static [u8]>, delay: Duration) -> MockPeer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let request = read_request(&mut socket).await;
        let _ = tx.send(request);

        for chunk in chunks {
            if socket.write_all(chunk).await.is_err() {
                return;
            }
            let _ = socket.flush().await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        let _ = socket.shutdown().await;
    });

    MockPeer { addr, request: rx }
}

/// Start a peer that writes `prefix` and then holds the connection open for `hold`.
pub async fn start_stalled_peer(prefix: &'static [u8], hold: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let _ = read_request(&mut socket).await;
        let _ = socket.write_all(prefix).await;
        tokio::time::sleep(hold).await;
    });

    addr
}

/// A peer that reports once the client has closed the connection.
pub struct ObservedPeer {
    pub addr: SocketAddr,
    released: oneshot::Receiver<Vec<u8>>,
}

impl ObservedPeer {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Everything the client sent, once the peer has read EOF.
    ///
    /// `None` if the connection was not closed within `within`.
    pub async fn released(self, within: Duration) -> Option<Vec<u8>> {
        tokio::time::timeout(within, self.released).await.ok()?.ok()
    }
}

/// Start a peer that answers a request with `response` and then waits for
/// the client to close. It never closes first.
pub async fn start_observed_peer(response: &'static [u8]) -> ObservedPeer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut received = read_request(&mut socket).await;
        if !received.is_empty() && socket.write_all(response).await.is_err() {
            return;
        }

        let mut buf = [0u8; 1024];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => received.extend_from_slice(&buf[..n]),
                Err(_) => return,
            }
        }
        let _ = tx.send(received);
    });

    ObservedPeer { addr, released: rx }
}

/// A loopback port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// A listener whose accept queue has been filled, so new connects stall.
///
/// Keep both returned values alive for the duration of the test.
pub async fn saturated_listener() -> (TcpListener, Vec<TcpStream>) {
    let socket = TcpSocket::new_v4().unwrap();
    socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let listener = socket.listen(1).unwrap();
    let addr = listener.local_addr().unwrap();

    let mut fillers = Vec::new();
    for _ in 0..8 {
        match tokio::time::timeout(Duration::from_millis(200), TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => fillers.push(stream),
            _ => break,
        }
    }
    (listener, fillers)
}

/// Probe config for `port`/`path` with short timeouts.
pub fn config_for(port: u16, path: &str) -> ProbeConfig {
    let mut config = ProbeConfig::new(port.to_string(), path);
    config.connect_timeout = Duration::from_secs(2);
    config.io_timeout = Duration::from_secs(2);
    config
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") && request.len() < 8192 {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    request
}
