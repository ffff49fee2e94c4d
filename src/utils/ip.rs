//! 客户端 IP 提取

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use tracing::debug;

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10
        }
    }
}

fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<SocketAddr>()
        .map(|addr| addr.ip())
        .or_else(|_| value.parse::<IpAddr>())
        .ok()
}

/// 记录到 links.ip 的客户端地址
///
/// 只有连接来自私有地址（本机反向代理）时才信任 X-Forwarded-For /
/// X-Real-IP，公网直连时使用连接地址，防止伪造。
pub fn client_ip(req: &HttpRequest) -> String {
    let peer = req.peer_addr().map(|addr| addr.ip());

    let forwarded = || {
        let headers = req.headers();
        headers
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(parse_ip)
            .or_else(|| {
                headers
                    .get("X-Real-IP")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_ip)
            })
    };

    let ip = match peer {
        Some(peer) if is_private_or_local(&peer) => forwarded().unwrap_or(peer),
        Some(peer) => peer,
        None => match forwarded() {
            Some(ip) => ip,
            None => {
                debug!("No peer address available for request");
                return String::new();
            }
        },
    };
    ip.to_string()
}
