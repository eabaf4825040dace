//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod fs_part_repository;
pub mod http_upload_repository;
pub mod md5_checksum_repository;
