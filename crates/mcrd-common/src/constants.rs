//! Built-in defaults, fixed paths, and well-known values.

/// Application name used in CLI output.
pub const APP_NAME: &str = "Minecraft Rootless Docker Operator";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "mcrd";

/// Project homepage printed by `help`.
pub const HOMEPAGE: &str = "https://github.com/tan2pow16/minecraft-server-docker";

/// Configuration file name inside the install directory.
pub const CONFIG_FILE_NAME: &str = "conf.json";

/// Build recipe file name inside the install directory.
pub const RECIPE_FILE_NAME: &str = "Dockerfile";

/// Default server version. 1.18.2 is the last release before the
/// chat-reporting changes.
pub const DEFAULT_VERSION: &str = "1.18.2";
/// Default image tag produced by `install`.
pub const DEFAULT_BUILD_TAG: &str = "mc-vanilla-server:build-0";
/// Default JDK base image.
pub const DEFAULT_BASE_IMAGE: &str = "openjdk:17-slim";
/// Default container name.
pub const DEFAULT_CONTAINER_NAME: &str = "mc-server";
/// Default rootless identity, `<name>:<uid>`.
pub const DEFAULT_ROOTLESS: &str = "gameserver:1024";
/// Directory name of the default instance data directory.
pub const DEFAULT_DATA_DIR_NAME: &str = "minecraft-server";
/// Default exposed port.
pub const DEFAULT_SERVER_PORT: &str = "25565";
/// Default JVM heap ceiling.
pub const DEFAULT_MEMORY: &str = "1024M";
/// Default container engine binary.
pub const DEFAULT_ENGINE: &str = "docker";

/// Public version index of the manifest service.
pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Root of the server files inside the image.
pub const CONTAINER_DATA_ROOT: &str = "/data";
/// Mount point of the instance data directory inside the container.
pub const CONTAINER_INSTANCE_DIR: &str = "/data/instance";

/// Login shell assigned to the rootless user.
pub const NOLOGIN_SHELL: &str = "/usr/sbin/nologin";

/// SELinux type that lets the engine mount a host directory.
pub const SANDBOX_FILE_LABEL: &str = "svirt_sandbox_file_t";

/// `chown` owner that hands the data directory back to the host.
pub const HOST_OWNER: &str = "0:0";
