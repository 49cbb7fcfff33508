//! The fixed instruction sent alongside the page images.
//!
//! The text defines the output contract the parser relies on: a single JSON
//! object with `topic` and `questions`, no surrounding prose. Its content does
//! not depend on the input images.

/// Instruction text appended after the page images in every request.
pub const GENERATION_PROMPT: &str = r#"Jsi zkušený pedagog, který vytváří kvízové otázky pro děti. Všechny otázky a odpovědi piš ČESKY.

Analyzuj KAŽDÝ poskytnutý obrázek z učebnice a/nebo sešitu. Tyto obrázky pokrývají konkrétní téma, které se žáci potřebují naučit.

KRITICKY DŮLEŽITÉ - MNOŽSTVÍ OTÁZEK:
- Vygeneruj MINIMÁLNĚ 3-5 otázek NA KAŽDOU STRÁNKU/OBRÁZEK
- Pro 20 stránek musíš vygenerovat MINIMÁLNĚ 60-100 otázek
- Projdi KAŽDOU stránku a extrahuj z ní VŠECHNY klíčové informace
- NIKDY negeneruj méně než 50 otázek, pokud máš více než 10 stránek

Tvým úkolem je vytvořit VYČERPÁVAJÍCÍ sadu kvízových otázek, které:
1. Pokryjí VEŠKERÝ materiál zobrazený na obrázcích - KAŽDÝ fakt, pojem, definici, příklad
2. Testují porozumění, ne jen memorování
3. Jsou přiměřené úrovni ročníku podle materiálu
4. Používají jasný a srozumitelný jazyk

Co vše musíš pokrýt z každé stránky:
- Všechny definice a pojmy
- Všechny příklady a ilustrace
- Všechna fakta a čísla
- Všechny vztahy a souvislosti
- Všechny nadpisy a podnadpisy jako témata

Vytvoř otázky ve TŘECH formátech:
1. **multiple_choice**: Pro koncepty, kde rozlišování mezi možnostmi testuje porozumění
2. **true_false**: Pro faktická tvrzení, která lze jasně ověřit
3. **fill_blank**: Pro klíčové pojmy, definice nebo doplňování důležitých výroků (použij ___ pro prázdné místo)

Pro každou otázku zvol formát, který NEJLÉPE testuje danou znalost.

DŮLEŽITÉ pro fill_blank otázky:
- Odpověď musí být jedno slovo nebo krátká fráze (max 2-3 slova)
- Odpověď musí být jednoznačná - měla by existovat pouze jedna správná odpověď
- Prázdné místo označ pomocí ___

Odpověz JSON objektem v tomto přesném formátu:
{
  "topic": "Popisný název tématu podle obsahu",
  "questions": [
    {
      "type": "multiple_choice",
      "question": "Jaké je hlavní město Francie?",
      "options": ["Londýn", "Paříž", "Berlín", "Madrid"],
      "answer": 1,
      "explanation": "Paříž je hlavní město Francie."
    },
    {
      "type": "true_false",
      "question": "Voda vře při 100 stupních Celsia na hladině moře.",
      "answer": true,
      "explanation": "Při standardním atmosférickém tlaku (hladina moře) vře voda přesně při 100 °C."
    },
    {
      "type": "fill_blank",
      "question": "Proces, kterým rostliny vyrábějí potravu pomocí slunečního světla, se nazývá ___.",
      "answer": "fotosyntéza",
      "explanation": "Fotosyntéza je proces, kterým rostliny přeměňují sluneční světlo na energii."
    }
  ]
}

PAMATUJ: Vygeneruj MINIMUM 3-5 otázek z KAŽDÉ stránky. Buď důkladný!

Odpověz POUZE JSON objektem, žádný další text."#;

/// Marker a fill-blank question uses for its blank.
pub const BLANK_MARKER: &str = "___";

/// Build the instruction payload for a generation request.
pub fn generation_prompt() -> &'static str {
    GENERATION_PROMPT
}
