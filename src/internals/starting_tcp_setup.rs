use ::anyhow::Context;
use ::anyhow::Result;
use ::anyhow::anyhow;
use ::reserve_port::ReservedPort;
use ::std::net::IpAddr;
use ::std::net::Ipv4Addr;
use ::std::net::SocketAddr;
use ::std::net::TcpListener;
use ::tokio::net::TcpListener as TokioTcpListener;

pub const DEFAULT_IP_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub struct StartingTcpSetup {
    pub socket_addr: SocketAddr,
    pub tcp_listener: TcpListener,
}

impl StartingTcpSetup {
    pub fn new(maybe_ip: Option<IpAddr>, maybe_port: Option<u16>) -> Result<Self> {
        let ip = maybe_ip.unwrap_or(DEFAULT_IP_ADDRESS);

        maybe_port
            .map(|port| Self::new_with_port(ip, port))
            .unwrap_or_else(|| Self::new_without_port(ip))
    }

    fn new_with_port(ip: IpAddr, port: u16) -> Result<Self> {
        let socket_addr = SocketAddr::new(ip, port);
        let tcp_listener = TcpListener::bind(socket_addr)
            .with_context(|| format!("Failed to create TCPListener for mock server on {socket_addr}"))?;

        Ok(Self {
            socket_addr,
            tcp_listener,
        })
    }

    /// The port is reserved for the life of the process,
    /// so a closed mock server's port is never handed to another one.
    fn new_without_port(ip: IpAddr) -> Result<Self> {
        let (tcp_listener, socket_addr) = ReservedPort::random_permanently_reserved_tcp(ip)
            .map_err(|err| anyhow!("No free port was found, {err:?}"))?;

        Ok(Self {
            socket_addr,
            tcp_listener,
        })
    }

    /// Hands the listener over to Tokio.
    ///
    /// This must be called from within a Tokio runtime.
    pub fn into_tokio_listener(self) -> ::std::io::Result<(SocketAddr, TokioTcpListener)> {
        self.tcp_listener.set_nonblocking(true)?;
        let tokio_tcp_listener = TokioTcpListener::from_std(self.tcp_listener)?;

        Ok((self.socket_addr, tokio_tcp_listener))
    }
}
