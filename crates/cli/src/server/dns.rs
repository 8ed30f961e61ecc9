use dnsplit_application::use_cases::HandleDatagramUseCase;
use dnsplit_domain::config::ServerConfig;
use dnsplit_infrastructure::dns::UdpDnsListener;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Binds the client-facing socket and serves until `shutdown` is cancelled.
pub async fn start_dns_server(
    server: &ServerConfig,
    handler: Arc<HandleDatagramUseCase>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = server.listen_addr().parse()?;
    let socket = create_udp_socket(socket_addr)?;

    let listener = UdpDnsListener::new(
        socket,
        handler,
        server.max_concurrent_requests,
        shutdown,
    );

    info!(
        bind_address = %listener.local_addr()?,
        max_concurrent = server.max_concurrent_requests,
        "DNS server ready"
    );

    listener.run().await;
    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
