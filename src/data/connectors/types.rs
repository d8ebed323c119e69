/// Columns a news batch must provide, matched by alias so batches exported
/// from the upstream scraper (camelCase, legacy vendor names) load without
/// renaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsColumn {
    NewsId,
    PublishDate,
    BondCodes,
    IssuerCodes,
}

impl NewsColumn {
    pub fn all() -> [NewsColumn; 4] {
        [
            NewsColumn::NewsId,
            NewsColumn::PublishDate,
            NewsColumn::BondCodes,
            NewsColumn::IssuerCodes,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsColumn::NewsId => "news_id",
            NewsColumn::PublishDate => "publish_date",
            NewsColumn::BondCodes => "bond_codes",
            NewsColumn::IssuerCodes => "issuer_codes",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            NewsColumn::NewsId => &["news_id", "News_ID", "newsId"],
            NewsColumn::PublishDate => &["publish_date", "publishDate"],
            NewsColumn::BondCodes => &["bond_codes", "windcodes", "s_info_windcode"],
            NewsColumn::IssuerCodes => &["issuer_codes", "b_info_issuercode"],
        }
    }
}

/// Columns of the bond reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileColumn {
    BondCode,
    IssuerCode,
    DefaultDate,
}

impl ProfileColumn {
    pub fn all() -> [ProfileColumn; 3] {
        [
            ProfileColumn::BondCode,
            ProfileColumn::IssuerCode,
            ProfileColumn::DefaultDate,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileColumn::BondCode => "bond_code",
            ProfileColumn::IssuerCode => "issuer_code",
            ProfileColumn::DefaultDate => "default_date",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ProfileColumn::BondCode => &["bond_code", "s_info_windcode"],
            ProfileColumn::IssuerCode => &["issuer_code", "b_info_issuercode"],
            ProfileColumn::DefaultDate => &["default_date", "b_default_date"],
        }
    }
}
