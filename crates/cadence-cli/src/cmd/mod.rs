pub mod init;
pub mod lanes;
pub mod next;
pub mod nudges;
pub mod plan;
pub mod promise;
