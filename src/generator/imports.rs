/// The inputs the import list depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportFlags {
    pub delegated: bool,
    pub enumerable: bool,
    pub supply_counter: bool,
    pub access_token: bool,
    pub royalties: bool,
    pub strings: bool,
    pub address: bool,
}

pub const ERC721_DELEGATED: &str = "gwei-slim-nft-contracts/contracts/base/ERC721Delegated.sol";
pub const ERC721_ENUMERABLE: &str =
    "@openzeppelin/contracts/token/ERC721/extensions/ERC721Enumerable.sol";
pub const ERC721: &str = "@openzeppelin/contracts/token/ERC721/ERC721.sol";
pub const COUNTERS: &str = "@openzeppelin/contracts/utils/Counters.sol";
pub const REENTRANCY_GUARD: &str = "@openzeppelin/contracts/security/ReentrancyGuard.sol";
pub const OWNABLE: &str = "@openzeppelin/contracts/access/Ownable.sol";
pub const IERC721: &str = "@openzeppelin/contracts/token/ERC721/IERC721.sol";
pub const IERC2981: &str = "@openzeppelin/contracts/interfaces/IERC2981.sol";
pub const STRINGS: &str = "@openzeppelin/contracts/utils/Strings.sol";
pub const ADDRESS: &str = "@openzeppelin/contracts/utils/Address.sol";

/// Import paths in canonical order.
pub fn generate(flags: ImportFlags) -> Vec<String> {
    let base = if flags.delegated {
        ERC721_DELEGATED
    } else if flags.enumerable {
        ERC721_ENUMERABLE
    } else {
        ERC721
    };

    [
        (true, base),
        (flags.supply_counter, COUNTERS),
        (true, REENTRANCY_GUARD),
        (!flags.delegated, OWNABLE),
        (flags.access_token, IERC721),
        (flags.royalties && !flags.delegated, IERC2981),
        (flags.strings, STRINGS),
        (flags.address, ADDRESS),
    ]
    .into_iter()
    .filter(|(needed, _)| *needed)
    .map(|(_, path)| path.to_string())
    .collect()
}
