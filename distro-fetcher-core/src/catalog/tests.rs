//! Integration tests for the catalog module

#[cfg(test)]
mod integration_tests {
    use crate::catalog::{current_lts, Catalog, UNKNOWN};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const RELEASES: &str = include_str!("../../tests/fixtures/releases.json");

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_json(RELEASES).unwrap()
    }

    /// Test the full listing against a published-looking catalog
    #[test]
    fn test_supported_release_listing() {
        let releases = catalog().supported_releases_on(day("2025-04-03"), "amd64", None);

        assert_eq!(
            releases,
            vec![
                "2025-04-03     24.04     Noble         LTS",
                "2025-04-01     20.04     Focal         LTS",
                "2025-03-27     24.04     Noble         LTS",
                "2025-03-27     22.04     Jammy         LTS",
                "2025-03-25     20.04     Focal         LTS",
                "2025-03-13     24.04     Noble         LTS",
                "2025-03-05     24.10     Oracular      ",
                "2025-03-05     22.04     Jammy         LTS",
            ]
        );
    }

    /// Test that the listing stays sorted and bounded for every cap
    #[test]
    fn test_listing_is_sorted_and_bounded() {
        let catalog = catalog();
        let today = day("2025-04-03");
        let total = catalog.supported_releases_on(today, "amd64", None).len();

        for n in 0..=total + 2 {
            let releases = catalog.supported_releases_on(today, "amd64", Some(n));
            assert_eq!(releases.len(), n.min(total));
            assert!(releases.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    /// Test that products drop out once their support window closes
    #[test]
    fn test_support_window_moves_with_today() {
        let catalog = catalog();

        // Focal ends 2025-05-29, Oracular 2025-07-10
        let releases = catalog.supported_releases_on(day("2025-06-01"), "amd64", None);
        assert_eq!(releases.len(), 6);
        assert!(releases.iter().all(|l| !l.contains("Focal")));

        let releases = catalog.supported_releases_on(day("2025-08-01"), "amd64", None);
        assert_eq!(releases.len(), 5);
        assert!(releases.iter().all(|l| !l.contains("Oracular")));
    }

    /// Test the current LTS derivation on top of the listing
    #[test]
    fn test_current_lts() {
        let ranked = catalog().supported_releases_on(day("2025-04-03"), "amd64", None);
        assert_eq!(
            current_lts(&ranked),
            "2025-04-03     24.04     Noble         LTS"
        );

        // Only Oracular (non-LTS) left after filtering out everything else
        let ranked: Vec<String> = ranked.into_iter().filter(|l| l.contains("Oracular")).collect();
        assert_eq!(current_lts(&ranked), UNKNOWN);
    }

    /// Test other architectures come from their own products
    #[test]
    fn test_arm64_listing() {
        let releases = catalog().supported_releases_on(day("2025-04-03"), "arm64", None);
        assert_eq!(releases, vec!["2025-04-03     24.04     Noble         LTS"]);
    }

    /// Test digest lookup, including the product-order tie break
    #[test]
    fn test_disk1_digest() {
        let catalog = catalog();

        // amd64 product key sorts before arm64 for the same date
        assert_eq!(catalog.disk1_sha256("2025-04-03"), "9208750752bc2ad2523f23da");

        // 22.04 sorts before 24.04, and both published on 2025-03-27
        let jammy = catalog.products["com.ubuntu.cloud:server:22.04:amd64"]
            .value()
            .unwrap()
            .versions
            .value()
            .unwrap()["20250327"]
            .value()
            .unwrap()
            .disk_image()
            .unwrap()
            .sha256
            .value()
            .unwrap()
            .clone();
        assert_eq!(catalog.disk1_sha256("20250327"), jammy);

        // Expired products are still searchable by date
        assert_ne!(catalog.disk1_sha256("2023-04-20"), UNKNOWN);

        assert_eq!(catalog.disk1_sha256("1999-01-01"), UNKNOWN);
        assert_eq!(catalog.disk1_sha256("bad-date"), UNKNOWN);
    }
}
