mod init_repository_successfully;
mod reinitializing_a_repository_fails;
