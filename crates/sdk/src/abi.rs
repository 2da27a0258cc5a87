//! Solidity interfaces whose selectors drive capability detection.
//!
//! Only the selectors are used; the declarations follow the deployed
//! contract extensions closely enough for those to match.

use alloy_sol_types::sol;

sol! {
    interface IERC20 {
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }

    interface IERC721 {
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function ownerOf(uint256 tokenId) external view returns (address);
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
        function setApprovalForAll(address operator, bool approved) external;

        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
    }

    interface IERC1155 {
        function uri(uint256 id) external view returns (string memory);
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function safeTransferFrom(address from, address to, uint256 id, uint256 amount, bytes calldata data) external;

        event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value);
        event TransferBatch(address indexed operator, address indexed from, address indexed to, uint256[] ids, uint256[] values);
    }

    interface IContractMetadata {
        function contractURI() external view returns (string memory);
        function setContractURI(string calldata uri) external;
    }

    interface IPrimarySale {
        function primarySaleRecipient() external view returns (address);
        function setPrimarySaleRecipient(address saleRecipient) external;
    }

    interface IRoyalty {
        function royaltyInfo(uint256 tokenId, uint256 salePrice) external view returns (address receiver, uint256 royaltyAmount);
        function getDefaultRoyaltyInfo() external view returns (address recipient, uint16 bps);
        function setDefaultRoyaltyInfo(address royaltyRecipient, uint256 royaltyBps) external;
    }

    interface IPlatformFee {
        function getPlatformFeeInfo() external view returns (address recipient, uint16 bps);
        function setPlatformFeeInfo(address platformFeeRecipient, uint256 platformFeeBps) external;
    }

    interface IPermissions {
        function hasRole(bytes32 role, address account) external view returns (bool);
        function grantRole(bytes32 role, address account) external;
        function revokeRole(bytes32 role, address account) external;

        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
    }

    interface IPermissionsEnumerable {
        function getRoleMember(bytes32 role, uint256 index) external view returns (address);
        function getRoleMemberCount(bytes32 role) external view returns (uint256);
    }

    interface IClaimConditions {
        function getActiveClaimConditionId() external view returns (uint256);
        function claimCondition() external view returns (uint256 currentStartId, uint256 count);
    }

    interface IMintableERC20 {
        function mintTo(address to, uint256 amount) external;
    }

    interface IMintableERC721 {
        function mintTo(address to, string calldata uri) external returns (uint256);
    }

    interface IMintableERC1155 {
        function mintTo(address to, uint256 tokenId, string calldata uri, uint256 amount) external;
    }

    interface IDirectListings {
        function totalListings() external view returns (uint256);
        function cancelListing(uint256 listingId) external;
        function approveBuyerForListing(uint256 listingId, address buyer, bool toApprove) external;
    }

    interface IEnglishAuctions {
        function totalAuctions() external view returns (uint256);
        function cancelAuction(uint256 auctionId) external;
        function bidInAuction(uint256 auctionId, uint256 bidAmount) external payable;
        function collectAuctionPayout(uint256 auctionId) external;
    }

    interface IVote {
        function proposalThreshold() external view returns (uint256);
        function propose(address[] memory targets, uint256[] memory values, bytes[] memory calldatas, string memory description) external returns (uint256);
        function castVote(uint256 proposalId, uint8 support) external returns (uint256);
    }

    interface ISplit {
        function distribute() external;
        function payeeCount() external view returns (uint256);
        function payee(uint256 index) external view returns (address);
        function shares(address account) external view returns (uint256);
    }

    interface IAccountFactory {
        function createAccount(address admin, bytes calldata data) external returns (address);
        function getAddress(address adminSigner, bytes calldata data) external view returns (address);
        function accountImplementation() external view returns (address);
        function getAllAccounts() external view returns (address[] memory);
    }

    interface IAccount {
        function entryPoint() external view returns (address);
        function getNonce() external view returns (uint256);
        function execute(address target, uint256 value, bytes calldata data) external;
        function executeBatch(address[] calldata target, uint256[] calldata value, bytes[] calldata data) external;
    }

    interface IAccountPermissions {
        function getAllAdmins() external view returns (address[] memory);
        function isAdmin(address account) external view returns (bool);
        function isActiveSigner(address signer) external view returns (bool);
    }

    interface IModularCore {
        function installModule(address module, bytes calldata data) external payable;
        function uninstallModule(address module, bytes calldata data) external payable;
    }
}
